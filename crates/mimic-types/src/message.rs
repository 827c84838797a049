//! Chat platform message types.
//!
//! The platform client itself lives outside this workspace; these types are
//! the boundary it hands to the resolution pipeline.

use serde::{Deserialize, Serialize};

/// One inbound chat message as delivered by the platform adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub author_id: String,
    pub channel_id: String,
    pub text: String,
    /// Set when the author is a bot account (including this bot).
    #[serde(default)]
    pub author_is_bot: bool,
}

impl InboundMessage {
    /// Convenience constructor for a message written by a human.
    pub fn from_user(
        author_id: impl Into<String>,
        channel_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            channel_id: channel_id.into(),
            text: text.into(),
            author_is_bot: false,
        }
    }
}

/// How the pipeline resolved a message that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// The reserved informational command.
    Command,
    /// A stored exchange was similar enough to reuse its output.
    Memory,
    /// The active responder generated a fresh reply.
    Generated,
    /// Resolution failed; the reply is a generic apology.
    Fallback,
}

/// A reply destined for the originating channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub channel_id: String,
    pub text: String,
    pub source: ReplySource,
}
