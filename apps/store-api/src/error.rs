//! Error types for the Store API.
//!
//! Every domain failure maps to a conventional HTTP status with a
//! human-readable JSON body: `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use velora_core::ValidationError;
use velora_db::StoreError;

/// Store API errors.
///
/// ## Status Mapping
/// ```text
/// Validation   → 400  (malformed/invalid input)
/// Conflict     → 400  (duplicate unique field; matches the admin frontend)
/// Unauthorized → 401  (bad credentials or bearer token)
/// NotFound     → 404  (missing id or FK target)
/// Internal     → 500  (unexpected persistence failure)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status this error renders as.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %msg, "internal error");
        }

        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),
            // A hierarchy write raced a cascade delete of its parent
            StoreError::ForeignKeyViolation { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("dup".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("no".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ApiError = StoreError::not_found("Product", "p1").into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = StoreError::duplicate("title", "Trail Runner").into();
        assert!(matches!(err, ApiError::Conflict(_)));

        let err: ApiError = StoreError::Internal("boom".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ApiError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "name is required");
    }
}
