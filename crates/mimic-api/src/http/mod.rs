//! HTTP adapter standing in for the chat platform.
//!
//! Axum routes under `/v1/` plus `/health`, with request tracing.

pub mod error;
pub mod handlers;
pub mod router;
