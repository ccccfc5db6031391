use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Rejections of the webhook receiver route.
#[derive(Error, Debug)]
pub enum ReceiverError {
    /// Unknown bot, token mismatch or foreign host. All look like a missing route to the caller.
    #[error("Webhook route not found")]
    NotFound,

    #[error("Secret token mismatch")]
    InvalidSecret,

    #[error("Malformed update: {0}")]
    MalformedUpdate(String),

    #[error("Update handler failed: {0}")]
    Handler(String),
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            Self::InvalidSecret => (StatusCode::FORBIDDEN, "invalid_secret"),
            Self::MalformedUpdate(_) => (StatusCode::BAD_REQUEST, "malformed_update"),
            Self::Handler(_) => (StatusCode::INTERNAL_SERVER_ERROR, "handler_failed"),
        };
        (status, Json(serde_json::json!({ "ok": false, "error": error }))).into_response()
    }
}
