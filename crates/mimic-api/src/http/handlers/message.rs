//! Inbound platform messages and direct questions.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use mimic_types::message::{InboundMessage, ReplySource};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: String,
    pub source: ReplySource,
}

/// POST /v1/messages
///
/// 200 with the reply, or 204 when the message was discarded.
pub async fn post_message(
    State(state): State<AppState>,
    Json(message): Json<InboundMessage>,
) -> Result<Response, AppError> {
    let resolved = state.pipeline.lock().await.resolve(&message).await?;

    Ok(match resolved {
        Some(reply) => Json(MessageResponse {
            reply: reply.text,
            source: reply.source,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// POST /v1/ask
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question must not be empty".to_string()));
    }

    let answer = state.pipeline.lock().await.ask(question).await;
    Ok(Json(AskResponse { answer }))
}
