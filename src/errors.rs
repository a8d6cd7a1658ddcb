// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One variant per failure class, translated to HTTP in a
/// single place by the ResponseError impl below
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PlacesError {
    /// Message exposed to API clients. Internal failures get a generic
    /// body so exception details never leak across the boundary.
    fn public_message(&self) -> String {
        match self {
            PlacesError::DatabaseError(_) => "Internal server error".to_string(),
            PlacesError::ConfigurationError(_) => "Service misconfigured".to_string(),
            other => other.to_string(),
        }
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            PlacesError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PlacesError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            PlacesError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PlacesError::ConfigurationError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            PlacesError::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            PlacesError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PlacesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PlacesError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PlacesError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            PlacesError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlacesError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlacesError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::UpstreamUnavailable("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err = PlacesError::DatabaseError("relation places does not exist".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = PlacesError::NotFound("ChIJ123".into());
        assert!(err.public_message().contains("ChIJ123"));
    }
}
