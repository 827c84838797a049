//! In-process memory store backed by an [`ExchangeRepository`].

use mimic_types::error::StoreError;
use mimic_types::memory::Exchange;
use tracing::{info, warn};

use super::repository::ExchangeRepository;

/// Ordered, append-only collection of remembered exchanges.
///
/// Every append persists the full sequence before returning, so a crash
/// loses at most the exchange being written.
pub struct MemoryStore<R> {
    repository: R,
    exchanges: Vec<Exchange>,
}

impl<R: ExchangeRepository> MemoryStore<R> {
    /// Load the store from `repository`.
    ///
    /// Never fails: unreadable or corrupt storage is logged and treated as
    /// an empty store.
    pub async fn load(repository: R) -> Self {
        let exchanges = match repository.load_all().await {
            Ok(exchanges) => {
                info!(count = exchanges.len(), "memory store loaded");
                exchanges
            }
            Err(StoreError::NotFound) => {
                info!("no memory store found, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "memory store unreadable, starting empty");
                Vec::new()
            }
        };

        Self {
            repository,
            exchanges,
        }
    }

    /// Append an exchange and persist the whole store.
    ///
    /// On a write failure the exchange is dropped from memory as well, so the
    /// in-process view never runs ahead of what is on disk.
    pub async fn append(&mut self, exchange: Exchange) -> Result<(), StoreError> {
        self.exchanges.push(exchange);
        if let Err(err) = self.repository.save_all(&self.exchanges).await {
            self.exchanges.pop();
            return Err(err);
        }
        info!(count = self.exchanges.len(), "exchange added to memory");
        Ok(())
    }

    /// Read view in insertion order.
    pub fn all(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Owned copy for background consumers (training).
    pub fn snapshot(&self) -> Vec<Exchange> {
        self.exchanges.clone()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}
