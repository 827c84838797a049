//! Bot configuration loader for Mimic.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`BotConfig`]. Falls back to defaults when the file is missing or malformed.

use std::path::Path;

use mimic_types::config::BotConfig;

use crate::filesystem::config_path;

/// Load the bot configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`BotConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config (validation is the caller's job).
pub async fn load_bot_config(data_dir: &Path) -> BotConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return BotConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return BotConfig::default();
        }
    };

    match toml::from_str::<BotConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            BotConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_types::config::ResponderKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_bot_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_bot_config(tmp.path()).await;
        assert_eq!(config.model_name, "AnonimBot v1.0");
        assert!(config.allowed_channel_ids.is_empty());
    }

    #[tokio::test]
    async fn load_bot_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model_name = "Echo"
allowed_channel_ids = ["42"]
responder = "remote"

[remote]
endpoint = "http://localhost:9000/generate"
"#,
        )
        .await
        .unwrap();

        let config = load_bot_config(tmp.path()).await;
        assert_eq!(config.model_name, "Echo");
        assert_eq!(config.allowed_channel_ids, vec!["42"]);
        assert_eq!(config.responder, ResponderKind::Remote);
        assert_eq!(config.remote.endpoint, "http://localhost:9000/generate");
    }

    #[tokio::test]
    async fn load_bot_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_bot_config(tmp.path()).await;
        assert_eq!(config.model_name, "AnonimBot v1.0");
        assert_eq!(config.responder, ResponderKind::Trained);
    }
}
