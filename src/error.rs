// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::validation::ValidationError;

/// Message returned for every 500. Store and provider details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError {
        message: String,
        field: Option<String>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        });

        if let ApiError::ValidationError { field: Some(field), .. } = self {
            response["field"] = json!(field);
        }

        response
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(message: impl Into<String>, field: Option<String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

/// Outcome of any stage of the product create/list paths. Each stage returns
/// this; `into_api_error` is the only place it becomes an HTTP status.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request body is not valid JSON")]
    MalformedBody,

    #[error("caller does not own store")]
    Forbidden,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ProductError {
    /// Map to the HTTP error. Storage failures are logged under `operation`
    /// and answered with a generic 500.
    pub fn into_api_error(self, operation: &'static str) -> ApiError {
        match self {
            ProductError::Unauthenticated => ApiError::unauthorized("Unauthenticated"),
            ProductError::Validation(err) => {
                ApiError::validation_error(err.to_string(), Some(err.field().as_str().to_string()))
            }
            ProductError::MalformedBody => ApiError::invalid_json("Request body is not valid JSON"),
            ProductError::Forbidden => ApiError::forbidden("Unauthorized"),
            ProductError::Database(err) => {
                tracing::error!(operation, error = %err, "[{}] {}", operation, err);
                ApiError::internal_server_error(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    const OP: &str = "TEST_OP";

    #[test]
    fn validation_error_names_field() {
        let api = ProductError::from(ValidationError::Missing(Field::ColorId)).into_api_error(OP);
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        let body = api.to_json();
        assert_eq!(body["field"], "colorId");
        assert_eq!(body["message"], "Color id is required");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn malformed_body_hides_decoder_detail() {
        let api = ProductError::MalformedBody.into_api_error(OP);
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        let body = api.to_json();
        assert_eq!(body["code"], "INVALID_JSON");
        assert!(body.get("field").is_none());
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(ProductError::Unauthenticated.into_api_error(OP).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ProductError::Forbidden.into_api_error(OP).status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_are_hidden() {
        let err = DatabaseError::QueryError("relation \"products\" does not exist".into());
        let api = ProductError::from(err).into_api_error(OP);
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = api.to_json();
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("relation"));
        assert!(body.get("field").is_none());
    }
}
