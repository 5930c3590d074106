//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brewmap_store::StoreError;
use serde_json::json;

/// API error type.
///
/// Error bodies keep the envelope shapes this API has always served:
/// a missing record is `{"error": {"Not Found": ...}}` and a rejected
/// API key is `{"response": {"Failure": ...}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(e) => match e {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Constraint(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let body = match &self {
            Self::Forbidden(msg) => json!({ "response": { "Failure": msg } }),
            Self::NotFound(msg) | Self::Store(StoreError::NotFound(msg)) => {
                json!({ "error": { "Not Found": msg } })
            }
            Self::Conflict(msg) | Self::Store(StoreError::Constraint(msg)) => {
                json!({ "error": { "Conflict": msg } })
            }
            Self::BadRequest(msg) => json!({ "error": { "Bad Request": msg } }),
            // Database details stay in the logs, not on the wire.
            Self::Store(_) => json!({ "error": { "Internal": "internal server error" } }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
