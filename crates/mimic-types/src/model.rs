//! Trainable model lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Readiness of the locally trained model.
///
/// `Training` may coexist with a previously fitted model, which keeps
/// serving until the new one replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Untrained,
    Training,
    Ready,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Untrained => write!(f, "untrained"),
            Readiness::Training => write!(f, "training"),
            Readiness::Ready => write!(f, "ready"),
        }
    }
}

/// Summary of one completed training pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Exchanges the model was fitted on.
    pub samples: usize,
    /// Exchanges dropped because they could not be encoded.
    pub skipped: usize,
    pub epochs: usize,
    /// Mean squared error over the last epoch.
    pub final_loss: f32,
    pub trained_at: DateTime<Utc>,
}

/// What a training request ended up doing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrainOutcome {
    /// A new model was fitted and is now serving.
    Trained(TrainingReport),
    /// No encodable exchanges; the model is untrained.
    NoData,
    /// Another training pass was already running; this request was skipped.
    AlreadyRunning,
    /// The active responder does not learn from memory.
    NotSupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_display() {
        assert_eq!(Readiness::Untrained.to_string(), "untrained");
        assert_eq!(Readiness::Training.to_string(), "training");
        assert_eq!(Readiness::Ready.to_string(), "ready");
    }

    #[test]
    fn test_readiness_serde_lowercase() {
        let json = serde_json::to_string(&Readiness::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
        let parsed: Readiness = serde_json::from_str("\"training\"").unwrap();
        assert_eq!(parsed, Readiness::Training);
    }

    #[test]
    fn test_train_outcome_tagged_serialization() {
        let json = serde_json::to_value(TrainOutcome::NoData).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "no_data" }));
    }
}
