//! Error handling and HTTP error conversion
//!
//! Every rejected request is answered with the same JSON envelope:
//!
//! ```json
//! { "error": { "code": "InvalidSignature", "message": "..." } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::signature::SignatureError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Reasons a webhook delivery is refused.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Webhook signature rejected: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("Required header '{0}' is missing")]
    MissingHeader(&'static str),

    #[error("Event '{0}' cannot be delivered through the webhook")]
    ReservedEvent(String),

    #[error("Request body is not a valid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidSignature(_) => (StatusCode::UNAUTHORIZED, "InvalidSignature"),
            ApiError::MissingHeader(_) => (StatusCode::BAD_REQUEST, "MissingHeader"),
            ApiError::ReservedEvent(_) => (StatusCode::BAD_REQUEST, "ReservedEvent"),
            ApiError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "InvalidPayload"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::MissingHeader(header) => Some(serde_json::json!({ "header": header })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        log_error(&self, status);

        let body = ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match status {
        StatusCode::UNAUTHORIZED => {
            tracing::warn!(status = %status, error = %error, "Rejected webhook delivery");
        }
        _ => {
            tracing::info!(status = %status, error = %error, "Rejected webhook delivery");
        }
    }
}
