use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer token claims. `sub` is the caller's user id; store ownership is
/// checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims expiring `expiry_hours` from now. An expiry past the range of
    /// a timestamp is refused.
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(JwtError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            sub: user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
    InvalidExpiry(u64),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidExpiry(hours) => write!(f, "Token expiry of {} hours is out of range", hours),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trips_subject() {
        let user = Uuid::new_v4();
        let token = generate_jwt(&Claims::new(user, 1).unwrap(), SECRET).unwrap();
        assert_eq!(decode_jwt(&token, SECRET).unwrap().sub, user);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_jwt(&Claims::new(Uuid::new_v4(), 1).unwrap(), SECRET).unwrap();
        assert!(matches!(decode_jwt(&token, "other"), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims { sub: Uuid::new_v4(), iat: now - 7200, exp: now - 3600 };
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(decode_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(generate_jwt(&Claims::new(Uuid::new_v4(), 1).unwrap(), ""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn huge_expiry_is_an_error() {
        let err = Claims::new(Uuid::new_v4(), 99_999_999_999_999).unwrap_err();
        assert!(matches!(err, JwtError::InvalidExpiry(99_999_999_999_999)));
        assert!(Claims::new(Uuid::new_v4(), u64::MAX).is_err());
    }
}
