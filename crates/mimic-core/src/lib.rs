//! Core logic for Mimic.
//!
//! Text codec, similarity matcher, memory store, responders, and the
//! resolution pipeline. Persistence and HTTP live behind traits implemented
//! in `mimic-infra`; this crate never depends on it.

pub mod chat;
pub mod codec;
pub mod matcher;
pub mod memory;
pub mod responder;
