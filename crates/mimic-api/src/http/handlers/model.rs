//! Model identity and readiness.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use mimic_types::config::ResponderKind;
use mimic_types::model::Readiness;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub model_name: String,
    /// Same text the reserved command answers with.
    pub info: String,
    pub responder: ResponderKind,
    pub readiness: Readiness,
    pub exchanges: usize,
}

/// GET /v1/model
pub async fn get_model(State(state): State<AppState>) -> Json<ModelResponse> {
    let pipeline = state.pipeline.lock().await;
    Json(ModelResponse {
        model_name: state.config.model_name.clone(),
        info: pipeline.model_info(),
        responder: state.config.responder,
        readiness: pipeline.readiness().await,
        exchanges: pipeline.memory().len(),
    })
}
