//! Application state wiring the pipeline to its concrete adapters.
//!
//! The pipeline is generic over the exchange repository; AppState pins it to
//! the JSON-file implementation and picks the responder named in config.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{info, warn};

use mimic_core::chat::{PipelineSettings, ResolutionPipeline};
use mimic_core::memory::store::MemoryStore;
use mimic_core::responder::{BoxResponder, TrainableResponder};
use mimic_infra::config::load_bot_config;
use mimic_infra::filesystem::{memory_path, resolve_data_dir};
use mimic_infra::remote::RemoteResponder;
use mimic_infra::storage::JsonExchangeRepository;
use mimic_types::config::{BotConfig, ResponderKind};

pub type ConcretePipeline = ResolutionPipeline<JsonExchangeRepository>;

/// Shared state for CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BotConfig>,
    pub pipeline: Arc<Mutex<ConcretePipeline>>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load and validate config, load memory.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_bot_config(&data_dir).await;
        Self::from_config(data_dir, config).await
    }

    /// Wire the pipeline from an already loaded config.
    pub async fn from_config(data_dir: PathBuf, config: BotConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let memory_file = memory_path(&data_dir, &config.memory_file);
        let memory = MemoryStore::load(JsonExchangeRepository::new(&memory_file)).await;
        info!(
            path = %memory_file.display(),
            exchanges = memory.len(),
            responder = ?config.responder,
            "memory loaded"
        );

        let responder = build_responder(&config)?;
        let pipeline =
            ResolutionPipeline::new(PipelineSettings::from_config(&config), memory, responder);

        Ok(Self {
            config: Arc::new(config),
            pipeline: Arc::new(Mutex::new(pipeline)),
            data_dir,
        })
    }

    /// Kick off the startup training pass in the background.
    pub async fn start_training(&self) {
        self.pipeline.lock().await.schedule_training();
    }
}

fn build_responder(config: &BotConfig) -> anyhow::Result<BoxResponder> {
    match config.responder {
        ResponderKind::Trained => Ok(BoxResponder::new(TrainableResponder::new(
            config.model_name.clone(),
            config.training.clone(),
        ))),
        ResponderKind::Remote => {
            let token = std::env::var(&config.remote.token_env)
                .ok()
                .filter(|token| !token.is_empty())
                .map(SecretString::from);
            if token.is_none() {
                warn!(
                    env = %config.remote.token_env,
                    "no inference token set, calling the endpoint unauthenticated"
                );
            }
            let responder =
                RemoteResponder::from_config(&config.remote, config.model_name.clone(), token)?;
            Ok(BoxResponder::new(responder))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_data_dir_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("nested");

        let state = AppState::init(Some(data_dir.clone())).await.unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(state.config.model_name, "AnonimBot v1.0");

        let pipeline = state.pipeline.lock().await;
        assert!(pipeline.memory().is_empty());
        assert!(pipeline.responder().learns_from_memory());
    }

    #[tokio::test]
    async fn test_remote_config_without_endpoint_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = BotConfig {
            responder: ResponderKind::Remote,
            ..BotConfig::default()
        };
        assert!(AppState::from_config(tmp.path().to_path_buf(), config).await.is_err());
    }

    #[tokio::test]
    async fn test_remote_responder_is_selected() {
        let tmp = TempDir::new().unwrap();
        let mut config = BotConfig {
            responder: ResponderKind::Remote,
            ..BotConfig::default()
        };
        config.remote.endpoint = "http://127.0.0.1:9/generate".to_string();

        let state = AppState::from_config(tmp.path().to_path_buf(), config).await.unwrap();
        assert!(!state.pipeline.lock().await.responder().learns_from_memory());
    }
}
