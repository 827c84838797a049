//! Test doubles for the memory repository port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mimic_types::error::StoreError;
use mimic_types::memory::Exchange;

use super::repository::ExchangeRepository;

/// Shared in-memory repository; clones see the same data.
#[derive(Clone, Default)]
pub(crate) struct InMemoryRepository {
    persisted: Arc<Mutex<Vec<Exchange>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    pub(crate) fn with(exchanges: Vec<Exchange>) -> Self {
        Self {
            persisted: Arc::new(Mutex::new(exchanges)),
            saves: Arc::default(),
        }
    }

    pub(crate) fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub(crate) fn persisted(&self) -> Vec<Exchange> {
        self.persisted.lock().unwrap().clone()
    }
}

impl ExchangeRepository for InMemoryRepository {
    async fn load_all(&self) -> Result<Vec<Exchange>, StoreError> {
        Ok(self.persisted.lock().unwrap().clone())
    }

    async fn save_all(&self, exchanges: &[Exchange]) -> Result<(), StoreError> {
        *self.persisted.lock().unwrap() = exchanges.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Repository that fails on load and/or save.
pub(crate) struct FailingRepository {
    corrupt: bool,
}

impl FailingRepository {
    pub(crate) fn corrupt() -> Self {
        Self { corrupt: true }
    }

    pub(crate) fn write_fails() -> Self {
        Self { corrupt: false }
    }
}

impl ExchangeRepository for FailingRepository {
    async fn load_all(&self) -> Result<Vec<Exchange>, StoreError> {
        if self.corrupt {
            Err(StoreError::Corrupt("not a JSON array".to_string()))
        } else {
            Ok(Vec::new())
        }
    }

    async fn save_all(&self, _exchanges: &[Exchange]) -> Result<(), StoreError> {
        Err(StoreError::Io("read-only filesystem".to_string()))
    }
}
