//! Shared domain types for Mimic.
//!
//! This crate contains the types used across the Mimic workspace:
//! exchanges, inbound messages, model readiness, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod memory;
pub mod message;
pub mod model;
