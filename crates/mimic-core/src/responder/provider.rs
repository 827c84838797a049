//! Responder trait definition.
//!
//! This is the single capability the resolution pipeline generates replies
//! through. The locally trained network and the hosted endpoint are two
//! implementations of it, picked from configuration.

use mimic_types::error::ModelError;
use mimic_types::memory::Exchange;
use mimic_types::model::{Readiness, TrainOutcome};

/// Trait for reply generators.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). `generate`
/// never fails: every internal fault becomes a fixed user-visible text.
pub trait Responder: Send + Sync {
    /// Model identifier shown to users.
    fn name(&self) -> &str;

    /// Whether generated exchanges should be remembered for retraining.
    fn learns_from_memory(&self) -> bool;

    /// Current readiness of the underlying model.
    fn readiness(&self) -> impl std::future::Future<Output = Readiness> + Send;

    /// Produce a reply for `text`.
    fn generate(&self, text: &str) -> impl std::future::Future<Output = String> + Send;

    /// Rebuild the model from `exchanges`.
    fn train(
        &self,
        exchanges: Vec<Exchange>,
    ) -> impl std::future::Future<Output = Result<TrainOutcome, ModelError>> + Send;
}
