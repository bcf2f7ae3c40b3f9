use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Args;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

/// Where the CLI sends API calls and which token it presents
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long, env = "CATALOG_API_URL", default_value = "http://localhost:3000", help = "Catalog API base URL")]
    pub url: String,

    #[arg(long, env = "CATALOG_TOKEN", hide_env_values = true, help = "Bearer token for authenticated calls")]
    pub token: Option<String>,
}

/// Thin reqwest wrapper around one Catalog API server
pub struct ApiClient {
    base: Url,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(args: &ServerArgs) -> anyhow::Result<Self> {
        let base = Url::parse(&args.url).with_context(|| format!("invalid server URL: {}", args.url))?;
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base,
            token: args.token.clone(),
            http,
        })
    }

    /// Absolute URL for `path` under the base URL, with `query` pairs appended
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Url> {
        let mut url = self.base.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    pub async fn get(&self, url: Url) -> anyhow::Result<Value> {
        self.send(self.http.get(url)).await
    }

    pub async fn post(&self, url: Url, body: &Value) -> anyhow::Result<Value> {
        self.send(self.http.post(url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> anyhow::Result<Value> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.context("request failed")?;
        read_body(response).await
    }
}

async fn read_body(response: Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.context("response was not JSON")?;

    if status.is_success() {
        return Ok(body);
    }

    let message = body.get("message").and_then(Value::as_str).unwrap_or("request failed");
    match body.get("field").and_then(Value::as_str) {
        Some(field) => Err(anyhow!("{} ({}): {}", status, field, message)),
        None => Err(anyhow!("{}: {}", status, message)),
    }
}
