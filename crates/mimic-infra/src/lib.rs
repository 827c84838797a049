//! Infrastructure layer for Mimic.
//!
//! Contains implementations of the ports defined in `mimic-core`:
//! the JSON-file memory repository and the hosted text-generation
//! responder, plus configuration loading and data-directory resolution.

pub mod config;
pub mod filesystem;
pub mod remote;
pub mod storage;
