//! JSON error responses
//!
//! Every failure leaves the API as `{ "error": <title>, "message": <detail> }`
//! with a status matching the failure class.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use postboard_core::{StorageError, StoreError, ValidationError};

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Failures an API handler can report
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not a number
    InvalidId(String),
    /// Request body could not be decoded
    BadRequest(String),
    Validation(ValidationError),
    NotFound(u64),
    Storage(StorageError),
    /// Task join failures and other unexpected conditions
    Internal(String),
    /// No route matched
    RouteNotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::BadRequest(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, message) = match self {
            ApiError::InvalidId(_) => ("Invalid ID", "ID must be a number".to_string()),
            ApiError::BadRequest(detail) => ("Invalid data", detail.clone()),
            ApiError::Validation(err) => (err.title(), err.to_string()),
            ApiError::NotFound(id) => ("Post not found", format!("No post with ID {}", id)),
            ApiError::Storage(_) | ApiError::Internal(_) => (
                "Internal server error",
                "The board could not be read or saved".to_string(),
            ),
            ApiError::RouteNotFound(path) => (
                "Route not found",
                format!("The route {} does not exist on this API", path),
            ),
        };
        ErrorBody {
            error: error.to_string(),
            message,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => ApiError::Validation(e),
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => error!(error = %e, "Storage failure"),
            ApiError::Internal(detail) => error!(error = %detail, "Internal failure"),
            _ => {}
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Parse a path id, rejecting anything that is not a non-negative integer
pub fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::InvalidId("abc".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation(ValidationError::SubjectTooShort).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::RouteNotFound("/nope".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Storage(StorageError::InvalidFormat {
                path: PathBuf::from("/data.json"),
                details: "bad".into(),
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_convert() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound(9)),
            ApiError::NotFound(9)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Validation(ValidationError::MissingFields)),
            ApiError::Validation(ValidationError::MissingFields)
        ));
    }

    #[test]
    fn validation_body_names_field() {
        let body = ApiError::Validation(ValidationError::MessageTooShort).body();
        assert_eq!(body.error, "Invalid message");
        assert!(body.message.contains("Message"));
    }

    #[test]
    fn storage_body_is_generic() {
        let body = ApiError::Storage(StorageError::InvalidFormat {
            path: PathBuf::from("/secret/location.json"),
            details: "bad".into(),
        })
        .body();
        assert!(!body.message.contains("/secret"));
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("-1"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidId(_))));
    }
}
