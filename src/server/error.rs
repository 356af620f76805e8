//! Mapping of service errors onto HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

use crate::RecapError;

/// An error as seen by HTTP clients: a status and a short `error` message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<RecapError> for ApiError {
    fn from(err: RecapError) -> Self {
        match err {
            RecapError::InvalidRequest(message) => Self::new(StatusCode::BAD_REQUEST, message),
            RecapError::ServiceUnavailable(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "Failed to generate summary")
            }
            RecapError::InvalidUpstreamResponse { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                "Summary service returned an unreadable response",
            ),
            RecapError::Mail(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
            }
            other => {
                error!("Request failed: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
        Self::new(StatusCode::BAD_REQUEST, "Request body must be valid JSON")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
