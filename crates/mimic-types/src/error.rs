use thiserror::Error;

/// Errors from the persisted memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("memory store not found")]
    NotFound,

    #[error("memory store I/O error: {0}")]
    Io(String),

    #[error("memory store is corrupt: {0}")]
    Corrupt(String),

    #[error("failed to serialize memory store: {0}")]
    Serialize(String),
}

/// Errors from the locally trained model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("input width mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model produced non-finite output")]
    NonFinite,

    #[error("training aborted: {0}")]
    TrainingAborted(String),
}

/// Failures of the hosted text-generation endpoint.
///
/// Each variant maps to a distinct user-visible fallback text.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("provider reported an error: {0}")]
    Provider(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned an empty generation")]
    EmptyGeneration,
}

/// Errors that fail a message resolution outright.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to persist exchange: {0}")]
    Storage(#[from] StoreError),
}

/// Errors in the bot configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
