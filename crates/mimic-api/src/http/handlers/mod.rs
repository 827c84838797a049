//! HTTP request handlers.

pub mod message;
pub mod model;

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
