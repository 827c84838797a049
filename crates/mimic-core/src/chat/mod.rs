//! Message resolution for Mimic.
//!
//! `ResolutionPipeline` turns one inbound chat message into at most one reply:
//! filter, reserved command, memory lookup, generation, persistence.

pub mod pipeline;

pub use pipeline::{PROCESSING_FAILURE_REPLY, PipelineSettings, ResolutionPipeline};
