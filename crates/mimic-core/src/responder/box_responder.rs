//! BoxResponder -- object-safe dynamic dispatch wrapper for Responder.
//!
//! 1. Define an object-safe `ResponderDyn` trait with boxed futures
//! 2. Blanket-impl `ResponderDyn` for all `T: Responder`
//! 3. `BoxResponder` wraps `Box<dyn ResponderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use mimic_types::error::ModelError;
use mimic_types::memory::Exchange;
use mimic_types::model::{Readiness, TrainOutcome};

use super::provider::Responder;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`Responder`] with boxed futures.
pub trait ResponderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn learns_from_memory(&self) -> bool;

    fn readiness_boxed(&self) -> BoxFuture<'_, Readiness>;

    fn generate_boxed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, String>;

    fn train_boxed(
        &self,
        exchanges: Vec<Exchange>,
    ) -> BoxFuture<'_, Result<TrainOutcome, ModelError>>;
}

impl<T: Responder> ResponderDyn for T {
    fn name(&self) -> &str {
        Responder::name(self)
    }

    fn learns_from_memory(&self) -> bool {
        Responder::learns_from_memory(self)
    }

    fn readiness_boxed(&self) -> BoxFuture<'_, Readiness> {
        Box::pin(self.readiness())
    }

    fn generate_boxed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, String> {
        Box::pin(self.generate(text))
    }

    fn train_boxed(
        &self,
        exchanges: Vec<Exchange>,
    ) -> BoxFuture<'_, Result<TrainOutcome, ModelError>> {
        Box::pin(self.train(exchanges))
    }
}

/// Type-erased responder for runtime selection (trained vs. remote).
pub struct BoxResponder {
    inner: Box<dyn ResponderDyn>,
}

impl BoxResponder {
    /// Wrap a concrete `Responder` in a type-erased box.
    pub fn new<T: Responder + 'static>(responder: T) -> Self {
        Self {
            inner: Box::new(responder),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn learns_from_memory(&self) -> bool {
        self.inner.learns_from_memory()
    }

    pub async fn readiness(&self) -> Readiness {
        self.inner.readiness_boxed().await
    }

    pub async fn generate(&self, text: &str) -> String {
        self.inner.generate_boxed(text).await
    }

    pub async fn train(&self, exchanges: Vec<Exchange>) -> Result<TrainOutcome, ModelError> {
        self.inner.train_boxed(exchanges).await
    }
}
