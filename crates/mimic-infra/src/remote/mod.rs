//! Hosted text-generation responder.

pub mod client;
pub mod types;

pub use client::{
    EMPTY_GENERATION_REPLY, PROVIDER_UNAVAILABLE_REPLY, RemoteResponder, TRANSPORT_FAILURE_REPLY,
};
