//! Application error type mapping to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mimic_core::chat::PROCESSING_FAILURE_REPLY;
use mimic_types::error::PipelineError;
use mimic_types::message::ReplySource;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Message resolution failed; the body still carries the apology reply.
    Pipeline(PipelineError),
    /// Malformed or empty request.
    Validation(String),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Pipeline(err) => {
                tracing::error!(error = %err, "message resolution failed");
                let body = json!({
                    "reply": PROCESSING_FAILURE_REPLY,
                    "source": ReplySource::Fallback,
                    "errors": [{ "code": "PROCESSING_FAILED", "message": err.to_string() }],
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            AppError::Validation(message) => {
                let body = json!({
                    "errors": [{ "code": "VALIDATION_ERROR", "message": message }],
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}
