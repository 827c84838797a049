//! Bot configuration types for Mimic.
//!
//! `BotConfig` represents `config.toml` in the data directory. Every field
//! has a default so an empty (or missing) file yields a runnable bot.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which responder answers messages the memory cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponderKind {
    /// Locally trained network, retrained from the memory store.
    #[default]
    Trained,
    /// Hosted text-generation endpoint; memory is not accumulated.
    Remote,
}

/// Top-level configuration for a Mimic bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Display name used in replies and the informational command.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Channels the bot answers in. Messages elsewhere are ignored.
    #[serde(default)]
    pub allowed_channel_ids: Vec<String>,

    /// Reserved command token (compared after case folding).
    #[serde(default = "default_command_token")]
    pub command_token: String,

    #[serde(default)]
    pub responder: ResponderKind,

    /// Memory file name, relative to the data directory.
    #[serde(default = "default_memory_file")]
    pub memory_file: String,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_model_name() -> String {
    "AnonimBot v1.0".to_string()
}

fn default_command_token() -> String {
    "!model".to_string()
}

fn default_memory_file() -> String {
    "exchanges.json".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            allowed_channel_ids: Vec::new(),
            command_token: default_command_token(),
            responder: ResponderKind::default(),
            memory_file: default_memory_file(),
            training: TrainingConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

impl BotConfig {
    /// Reject settings that would make training or remote calls meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.training.epochs == 0 {
            return Err(ConfigError::Invalid("training.epochs must be at least 1".into()));
        }
        if self.training.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "training.batch_size must be at least 1".into(),
            ));
        }
        if !(self.training.learning_rate > 0.0) {
            return Err(ConfigError::Invalid(
                "training.learning_rate must be positive".into(),
            ));
        }
        if self.responder == ResponderKind::Remote && self.remote.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "remote.endpoint is required when responder = \"remote\"".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for the locally trained responder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Full passes over the training set per training run.
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// Schedule a background retrain after this many new exchanges.
    /// `None` trains only at startup.
    #[serde(default = "default_retrain_every")]
    pub retrain_every: Option<usize>,

    /// Fixed RNG seed for reproducible weight initialisation.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_epochs() -> usize {
    50
}

fn default_batch_size() -> usize {
    32
}

fn default_learning_rate() -> f32 {
    0.001
}

fn default_retrain_every() -> Option<usize> {
    Some(10)
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            learning_rate: default_learning_rate(),
            retrain_every: default_retrain_every(),
            seed: None,
        }
    }
}

/// Settings for the hosted text-generation endpoint.
///
/// The sampling knobs are passed through to the provider untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Full URL of the generation endpoint.
    #[serde(default)]
    pub endpoint: String,

    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub generation: GenerationParameters,
}

fn default_token_env() -> String {
    "MIMIC_INFERENCE_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            generation: GenerationParameters::default(),
        }
    }
}

/// Generation policy sent with every remote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub temperature: f32,
    pub max_length: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_length: 100,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.2,
        }
    }
}
