//! Conversation memory.
//!
//! - `ExchangeRepository`: persistence port implemented in mimic-infra
//! - `MemoryStore`: the ordered, append-only exchange sequence the pipeline owns

pub mod repository;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
