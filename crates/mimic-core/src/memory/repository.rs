//! ExchangeRepository trait definition.
//!
//! The memory store is small and rewritten wholesale, so the port only knows
//! how to load and replace the full ordered sequence. Swapping in an
//! incremental backend means changing this trait, not the store's callers.

use mimic_types::error::StoreError;
use mimic_types::memory::Exchange;

/// Persistence port for the memory store.
///
/// Implementations live in mimic-infra (e.g., `JsonExchangeRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ExchangeRepository: Send + Sync {
    /// Load every persisted exchange in insertion order.
    ///
    /// Returns an empty sequence when nothing has been persisted yet.
    fn load_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Exchange>, StoreError>> + Send;

    /// Durably replace the persisted sequence with `exchanges`.
    fn save_all(
        &self,
        exchanges: &[Exchange],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
