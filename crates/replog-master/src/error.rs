//! Maps [`replog_core::CoreError`] to the HTTP status policy spec.md
//! §7/§9 fixes: validation -> 400, no-quorum -> 200 with a read-only
//! notice (deliberately not 503 — preserved, not "fixed"), everything
//! else -> 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use replog_core::CoreError;

pub struct AppendError(pub CoreError);

impl From<CoreError> for AppendError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppendError {
    fn into_response(self) -> Response {
        match self.0 {
            CoreError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Invalid POST request. Server accepts HTTP POST requests containing JSON of \
                     the following schema: {{\"msg\": \"message\"}}. Exception: {msg}\n"
                ),
            )
                .into_response(),
            CoreError::NoQuorum => (
                StatusCode::OK,
                "There is no Secondaries quorum. The Master has been switched into read-only \
                 mode and does not accept messages append requests\n"
                    .to_string(),
            )
                .into_response(),
            CoreError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to replicate message. Exception: {msg}\n"),
            )
                .into_response(),
        }
    }
}
