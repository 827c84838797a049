//! Responder abstractions for Mimic.
//!
//! - `Responder`: RPITIT trait for the reply generators
//! - `BoxResponder`: object-safe wrapper selected from configuration at startup
//! - `TrainableResponder`: local network retrained from memory
//! - `network`: the dense regression network it owns

pub mod box_responder;
pub mod network;
pub mod provider;
pub mod trained;

pub use box_responder::BoxResponder;
pub use provider::Responder;
pub use trained::TrainableResponder;
