use async_trait::async_trait;
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::auth::{decode_jwt, Claims};

/// Caller identity resolved for one request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// Resolves who is calling. Returning `None` means anonymous; handlers decide
/// whether that is acceptable.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_caller(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Identity from an HS256 bearer token
pub struct JwtIdentityProvider {
    secret: String,
}

impl JwtIdentityProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve_caller(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = match extract_jwt_from_headers(headers) {
            Ok(token) => token,
            Err(msg) => {
                tracing::debug!("No caller identity: {}", msg);
                return None;
            }
        };

        match decode_jwt(&token, &self.secret) {
            Ok(claims) => Some(Identity::from(claims)),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                None
            }
        }
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_jwt;
    use axum::http::HeaderValue;

    const SECRET: &str = "provider-secret";

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn resolves_valid_bearer() {
        let user = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(user, 1).unwrap(), SECRET).unwrap();
        let provider = JwtIdentityProvider::new(SECRET);

        let identity = provider.resolve_caller(&headers(&format!("Bearer {}", token))).await;
        assert_eq!(identity, Some(Identity { user_id: user }));
    }

    #[tokio::test]
    async fn anonymous_without_header() {
        let provider = JwtIdentityProvider::new(SECRET);
        assert_eq!(provider.resolve_caller(&HeaderMap::new()).await, None);
    }

    #[tokio::test]
    async fn anonymous_for_non_bearer_or_garbage() {
        let provider = JwtIdentityProvider::new(SECRET);
        assert_eq!(provider.resolve_caller(&headers("Basic dXNlcjpwYXNz")).await, None);
        assert_eq!(provider.resolve_caller(&headers("Bearer ")).await, None);
        assert_eq!(provider.resolve_caller(&headers("Bearer not.a.jwt")).await, None);
    }

    #[test]
    fn extracts_trimmed_token() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc ")).unwrap(), "abc");
    }
}
