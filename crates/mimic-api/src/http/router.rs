//! Axum router configuration with middleware.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the adapter router with all routes and request tracing.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/messages", post(handlers::message::post_message))
        .route("/ask", post(handlers::message::ask))
        .route("/model", get(handlers::model::get_model));

    Router::new()
        .nest("/v1", api_routes)
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
