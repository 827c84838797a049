//! Resolution pipeline orchestrating memory lookup, generation, and persistence.
//!
//! Per message: `Received -> Filtered -> CommandCheck -> MatchLookup ->
//! Generate -> Persist -> Replied`. A discarded message produces no reply;
//! a command or memory hit replies immediately and writes nothing.
//!
//! The pipeline owns the memory store and a handle to the active responder.
//! Callers resolve one message at a time (`&mut self`); training runs as a
//! spawned task and never holds up the message path.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use mimic_types::config::BotConfig;
use mimic_types::error::{ModelError, PipelineError};
use mimic_types::memory::Exchange;
use mimic_types::message::{InboundMessage, Reply, ReplySource};
use mimic_types::model::{Readiness, TrainOutcome};

use crate::codec::encode;
use crate::matcher;
use crate::memory::repository::ExchangeRepository;
use crate::memory::store::MemoryStore;
use crate::responder::BoxResponder;

/// Reply sent when resolving a message failed outright.
pub const PROCESSING_FAILURE_REPLY: &str = "Sorry, I couldn't process that message.";

/// Static pipeline settings derived from [`BotConfig`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub allowed_channel_ids: HashSet<String>,
    /// Reserved command token, already case-folded.
    pub command_token: String,
    pub model_name: String,
    /// Schedule a retrain after this many persisted exchanges.
    pub retrain_every: Option<usize>,
}

impl PipelineSettings {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            allowed_channel_ids: config.allowed_channel_ids.iter().cloned().collect(),
            command_token: config.command_token.to_lowercase(),
            model_name: config.model_name.clone(),
            retrain_every: config.training.retrain_every.filter(|&n| n > 0),
        }
    }
}

/// Turns inbound messages into replies and grows the memory store.
pub struct ResolutionPipeline<R: ExchangeRepository> {
    settings: PipelineSettings,
    memory: MemoryStore<R>,
    responder: Arc<BoxResponder>,
    exchanges_since_training: usize,
    training_task: Option<JoinHandle<()>>,
}

impl<R: ExchangeRepository> ResolutionPipeline<R> {
    pub fn new(
        settings: PipelineSettings,
        memory: MemoryStore<R>,
        responder: BoxResponder,
    ) -> Self {
        Self {
            settings,
            memory,
            responder: Arc::new(responder),
            exchanges_since_training: 0,
            training_task: None,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn memory(&self) -> &MemoryStore<R> {
        &self.memory
    }

    pub fn responder(&self) -> &BoxResponder {
        &self.responder
    }

    /// Informational text for the reserved command.
    pub fn model_info(&self) -> String {
        format!(
            "I am a bot based on the {} model. I can help with training and generating answers!",
            self.settings.model_name
        )
    }

    pub async fn readiness(&self) -> Readiness {
        self.responder.readiness().await
    }

    /// Answer a question directly through the active responder.
    ///
    /// Bypasses memory lookup and does not record the exchange.
    pub async fn ask(&self, question: &str) -> String {
        self.responder.generate(&question.to_lowercase()).await
    }

    /// Resolve one inbound message.
    ///
    /// Returns `Ok(None)` when the message is discarded. The only error is a
    /// failed memory write, which would otherwise lose the exchange silently.
    #[instrument(skip_all, fields(channel_id = %message.channel_id))]
    pub async fn resolve(
        &mut self,
        message: &InboundMessage,
    ) -> Result<Option<Reply>, PipelineError> {
        if message.author_is_bot || !self.settings.allowed_channel_ids.contains(&message.channel_id)
        {
            debug!(author_is_bot = message.author_is_bot, "message discarded");
            return Ok(None);
        }

        let normalized = message.text.to_lowercase();
        let reply = |text: String, source: ReplySource| Reply {
            channel_id: message.channel_id.clone(),
            text,
            source,
        };

        if normalized == self.settings.command_token {
            debug!("reserved command");
            return Ok(Some(reply(self.model_info(), ReplySource::Command)));
        }

        if let Some(hit) = matcher::find(&encode(&normalized), self.memory.all()) {
            return Ok(Some(reply(hit.output.to_string(), ReplySource::Memory)));
        }

        let generated = self.responder.generate(&normalized).await;

        if self.responder.learns_from_memory() {
            self.memory
                .append(Exchange::new(normalized, generated.clone()))
                .await?;
            self.note_new_exchange();
        }

        Ok(Some(reply(generated, ReplySource::Generated)))
    }

    /// Outermost handler: like [`resolve`](Self::resolve), but a failed
    /// resolution becomes a generic apology instead of an error.
    pub async fn handle(&mut self, message: &InboundMessage) -> Option<Reply> {
        match self.resolve(message).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, channel_id = %message.channel_id, "message resolution failed");
                Some(Reply {
                    channel_id: message.channel_id.clone(),
                    text: PROCESSING_FAILURE_REPLY.to_string(),
                    source: ReplySource::Fallback,
                })
            }
        }
    }

    fn note_new_exchange(&mut self) {
        self.exchanges_since_training += 1;
        let Some(threshold) = self.settings.retrain_every else {
            return;
        };
        if self.exchanges_since_training >= threshold {
            info!(new_exchanges = self.exchanges_since_training, "scheduling retrain");
            self.schedule_training();
        }
    }

    /// Start a background training pass over a snapshot of memory.
    ///
    /// Does nothing for responders that do not learn from memory. While a
    /// previous pass is still running, the new exchanges stay counted and
    /// the next persisted exchange tries again.
    pub fn schedule_training(&mut self) {
        if !self.responder.learns_from_memory() {
            return;
        }
        if self.training_task.as_ref().is_some_and(|task| !task.is_finished()) {
            debug!(
                pending = self.exchanges_since_training,
                "training still running, retrain deferred"
            );
            return;
        }
        self.exchanges_since_training = 0;

        let responder = Arc::clone(&self.responder);
        let snapshot = self.memory.snapshot();
        self.training_task = Some(tokio::spawn(async move {
            match responder.train(snapshot).await {
                Ok(outcome) => debug!(?outcome, "background training finished"),
                Err(err) => error!(error = %err, "background training failed"),
            }
        }));
    }

    /// Wait for the most recently scheduled training pass, if any.
    pub async fn wait_for_training(&mut self) {
        if let Some(task) = self.training_task.take() {
            if let Err(err) = task.await {
                error!(error = %err, "training task panicked");
            }
        }
    }

    /// Train synchronously over the current memory.
    pub async fn train_now(&mut self) -> Result<TrainOutcome, ModelError> {
        if !self.responder.learns_from_memory() {
            return Ok(TrainOutcome::NotSupported);
        }
        self.wait_for_training().await;
        self.exchanges_since_training = 0;
        self.responder.train(self.memory.snapshot()).await
    }
}
