//! JSON-file implementation of [`ExchangeRepository`].
//!
//! The whole store is one pretty-printed JSON array of
//! `{ "input": ..., "output": ... }` records, read wholesale at startup and
//! rewritten wholesale on every append. Each rewrite goes to a sibling temp
//! file that is then renamed over the target.

use std::path::{Path, PathBuf};

use mimic_core::memory::repository::ExchangeRepository;
use mimic_types::error::StoreError;
use mimic_types::memory::Exchange;
use serde_json::Value;
use tracing::warn;

/// Memory repository stored as a single JSON document.
pub struct JsonExchangeRepository {
    path: PathBuf,
}

impl JsonExchangeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "exchanges.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Parse the stored document, skipping records that are not
/// `{ input: string, output: string }`.
fn parse_exchanges(content: &str) -> Result<Vec<Exchange>, StoreError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    let Value::Array(records) = document else {
        return Err(StoreError::Corrupt("expected a JSON array".to_string()));
    };

    let mut exchanges = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Exchange>(record) {
            Ok(exchange) => exchanges.push(exchange),
            Err(err) => warn!(index, error = %err, "skipping malformed memory record"),
        }
    }
    Ok(exchanges)
}

impl ExchangeRepository for JsonExchangeRepository {
    async fn load_all(&self) -> Result<Vec<Exchange>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound);
            }
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        parse_exchanges(&content)
    }

    async fn save_all(&self, exchanges: &[Exchange]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(exchanges)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}
