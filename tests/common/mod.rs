#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use catalog_api::auth::{generate_jwt, Claims};
use catalog_api::config::{AppConfig, Environment};
use catalog_api::database::models::{Category, Color, Size, Store};
use catalog_api::database::MemoryProductStore;
use catalog_api::middleware::JwtIdentityProvider;
use catalog_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// One store with an owner and one category, color and size per slot.
/// `alt_*` ids are a second set in the same store, for filter tests.
pub struct Seed {
    pub store_id: Uuid,
    pub owner: Uuid,
    pub category: Uuid,
    pub color: Uuid,
    pub size: Uuid,
    pub alt_category: Uuid,
    pub alt_color: Uuid,
    pub alt_size: Uuid,
}

/// The full router wired to an in-memory store, driven with `oneshot`
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryProductStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::for_environment(Environment::Development);
        config.security.jwt_secret = TEST_SECRET.to_string();
        config.api.enable_request_logging = false;

        let store = Arc::new(MemoryProductStore::new());
        let state = AppState::new(store.clone(), Arc::new(JwtIdentityProvider::new(TEST_SECRET)), config);

        Self { router: app(state), store }
    }

    /// Seed a store owned by a fresh user
    pub async fn seed_store(&self) -> Seed {
        let owner = Uuid::new_v4();
        let store = Store::new(owner, "Test store");
        let store_id = store.id;
        self.store.insert_store(store).await;

        let category = Category::new(store_id, "Shirts");
        let alt_category = Category::new(store_id, "Hats");
        let color = Color::new(store_id, "Black", "#000000");
        let alt_color = Color::new(store_id, "White", "#ffffff");
        let size = Size::new(store_id, "Medium", "M");
        let alt_size = Size::new(store_id, "Large", "L");

        let seed = Seed {
            store_id,
            owner,
            category: category.id,
            color: color.id,
            size: size.id,
            alt_category: alt_category.id,
            alt_color: alt_color.id,
            alt_size: alt_size.id,
        };

        for c in [category, alt_category] {
            self.store.insert_category(c).await;
        }
        for c in [color, alt_color] {
            self.store.insert_color(c).await;
        }
        for s in [size, alt_size] {
            self.store.insert_size(s).await;
        }
        seed
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty())?;
        self.send(request).await
    }

    pub async fn post_raw(&self, uri: &str, token: Option<&str>, body: impl Into<Body>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(body.into())?).await
    }

    pub async fn create_product(&self, store_id: &str, token: Option<&str>, body: &Value) -> Result<(StatusCode, Value)> {
        self.post_raw(&format!("/{}/products", store_id), token, body.to_string()).await
    }

    /// Create a product as the store owner and return the response body
    pub async fn create_ok(&self, seed: &Seed, body: &Value) -> Result<Value> {
        let token = token_for(seed.owner);
        let (status, created) = self.create_product(&seed.store_id.to_string(), Some(&token), body).await?;
        anyhow::ensure!(status == StatusCode::OK, "create failed: {} {}", status, created);
        Ok(created)
    }
}

pub fn token_for(user: Uuid) -> String {
    let claims = Claims::new(user, 1).expect("token claims");
    generate_jwt(&claims, TEST_SECRET).expect("sign test token")
}

/// A complete create body against the seed's primary category/color/size
pub fn product_body(seed: &Seed, name: &str) -> Value {
    json!({
        "name": name,
        "price": "19.99",
        "categoryId": seed.category,
        "colorId": seed.color,
        "sizeId": seed.size,
        "images": [{ "url": "https://cdn.example.com/a.png" }, { "url": "https://cdn.example.com/b.png" }]
    })
}

pub fn names(products: &Value) -> Vec<String> {
    products
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
