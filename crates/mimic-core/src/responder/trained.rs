//! TrainableResponder -- [`Responder`] backed by the local dense network.
//!
//! The model is rebuilt wholesale on every training pass. Readiness is
//! explicit: `generate` consults the slot rather than assuming the startup
//! training has finished. While a retrain runs, the previous model (if any)
//! keeps answering.

use std::sync::Arc;

use chrono::Utc;
use ndarray::Array2;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use mimic_types::config::TrainingConfig;
use mimic_types::error::ModelError;
use mimic_types::memory::Exchange;
use mimic_types::model::{Readiness, TrainOutcome, TrainingReport};

use super::network::{Network, to_unit};
use super::provider::Responder;
use crate::codec::{MAX_LEN, decode, encode};

/// Reply while no model has been fitted yet.
pub const NOT_READY_REPLY: &str = "I don't know how to answer yet. But I'm learning!";

/// Reply when a forward pass fails.
pub const INFERENCE_FAILURE_REPLY: &str = "Sorry, something went wrong while generating a reply.";

struct ModelSlot {
    readiness: Readiness,
    network: Option<Arc<Network>>,
    last_report: Option<TrainingReport>,
}

/// Locally trained responder.
pub struct TrainableResponder {
    model_name: String,
    config: TrainingConfig,
    slot: RwLock<ModelSlot>,
}

impl TrainableResponder {
    /// Create an untrained responder. Call [`Responder::train`] to fit it.
    pub fn new(model_name: impl Into<String>, config: TrainingConfig) -> Self {
        Self {
            model_name: model_name.into(),
            config,
            slot: RwLock::new(ModelSlot {
                readiness: Readiness::Untrained,
                network: None,
                last_report: None,
            }),
        }
    }

    /// Report of the most recent successful training pass.
    pub async fn last_report(&self) -> Option<TrainingReport> {
        self.slot.read().await.last_report.clone()
    }

    fn annotate(&self, text: &str) -> String {
        format!("{text} (model: {})", self.model_name)
    }
}

fn unit_matrix<'a>(texts: impl ExactSizeIterator<Item = &'a str>) -> Array2<f32> {
    let mut matrix = Array2::zeros((texts.len(), MAX_LEN));
    for (i, text) in texts.enumerate() {
        matrix.row_mut(i).assign(&to_unit(&encode(text)));
    }
    matrix
}

impl Responder for TrainableResponder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn learns_from_memory(&self) -> bool {
        true
    }

    async fn readiness(&self) -> Readiness {
        self.slot.read().await.readiness
    }

    async fn generate(&self, text: &str) -> String {
        let network = self.slot.read().await.network.clone();
        let Some(network) = network else {
            return NOT_READY_REPLY.to_string();
        };

        match network.predict(&encode(text)) {
            Ok(output) => self.annotate(&decode(&output)),
            Err(err) => {
                error!(error = %err, "local inference failed");
                INFERENCE_FAILURE_REPLY.to_string()
            }
        }
    }

    async fn train(&self, exchanges: Vec<Exchange>) -> Result<TrainOutcome, ModelError> {
        {
            let mut slot = self.slot.write().await;
            if slot.readiness == Readiness::Training {
                info!("training already in progress, skipping request");
                return Ok(TrainOutcome::AlreadyRunning);
            }
            slot.readiness = Readiness::Training;
        }

        let total = exchanges.len();
        let valid: Vec<Exchange> = exchanges
            .into_iter()
            .filter(|exchange| {
                if exchange.is_encodable() {
                    true
                } else {
                    warn!(input = ?exchange.input, "skipping exchange that cannot be encoded");
                    false
                }
            })
            .collect();
        let skipped = total - valid.len();

        if valid.is_empty() {
            let mut slot = self.slot.write().await;
            slot.readiness = Readiness::Untrained;
            slot.network = None;
            warn!(skipped, "not enough data to train, model stays untrained");
            return Ok(TrainOutcome::NoData);
        }

        let samples = valid.len();
        let config = self.config.clone();
        info!(samples, epochs = config.epochs, "training started");

        let fitted = tokio::task::spawn_blocking(move || {
            let inputs = unit_matrix(valid.iter().map(|e| e.input.as_str()));
            let targets = unit_matrix(valid.iter().map(|e| e.output.as_str()));
            Network::fit(&inputs, &targets, &config)
        })
        .await
        .map_err(|e| ModelError::TrainingAborted(format!("training task failed: {e}")))
        .and_then(|result| result);

        let mut slot = self.slot.write().await;
        match fitted {
            Ok(fit) => {
                let report = TrainingReport {
                    samples,
                    skipped,
                    epochs: fit.epoch_losses.len(),
                    final_loss: fit.final_loss(),
                    trained_at: Utc::now(),
                };
                info!(samples, final_loss = report.final_loss, "model trained");
                slot.network = Some(Arc::new(fit.network));
                slot.readiness = Readiness::Ready;
                slot.last_report = Some(report.clone());
                Ok(TrainOutcome::Trained(report))
            }
            Err(err) => {
                error!(error = %err, "training failed");
                slot.readiness = if slot.network.is_some() {
                    Readiness::Ready
                } else {
                    Readiness::Untrained
                };
                Err(err)
            }
        }
    }
}
