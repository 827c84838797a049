//! Memory types for Mimic.
//!
//! An [`Exchange`] is one remembered (input, output) pair. The memory store is
//! an ordered, append-only sequence of them; order decides which stored input
//! wins a similarity tie.

use serde::{Deserialize, Serialize};

/// A single remembered exchange between a user message and the bot's reply.
///
/// Immutable once written. The persisted form is exactly
/// `{ "input": ..., "output": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Normalized (case-folded) user text.
    pub input: String,
    /// Reply that was sent for `input`.
    pub output: String,
}

impl Exchange {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Whether both sides survive the fixed-width text encoding.
    ///
    /// The encoding reserves code `0` as padding, so text carrying literal
    /// NUL characters cannot be represented and is excluded from training.
    pub fn is_encodable(&self) -> bool {
        !self.input.contains('\0') && !self.output.contains('\0')
    }
}
