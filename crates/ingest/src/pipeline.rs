//! The consume loop: receive, decode, save, repeat.
//!
//! ## Algorithm
//! For each message pulled from the source:
//! 1. Decode the payload into a `NewRecipe`
//!    - on failure: log at `warn`, drop the message, continue
//! 2. Save it through the injected `RecipeStore`
//!    - on failure: log at `error`, drop the message, continue
//! 3. Only then pull the next message
//!
//! The loop ends when the cancellation signal fires or the source is
//! exhausted. Cancellation is observed between messages and while waiting
//! for the next one, never during a save.
//!
//! Delivery is at-least-once upstream and nothing here de-duplicates: a
//! redelivered message becomes a second recipe with its own identity.

use std::sync::Arc;

use catalog::{RecipeId, RecipeStore};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::decode::decode_recipe;
use crate::error::{IngestError, SourceError};
use crate::source::MessageSource;

/// What happened to a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Persisted as a new recipe.
    Saved(RecipeId),
    /// Not a valid recipe; dropped.
    DecodeFailed,
    /// Valid, but the store rejected it; dropped.
    SaveFailed,
}

/// Counters for one ingestion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub received: u64,
    pub saved: u64,
    pub decode_failures: u64,
    pub save_failures: u64,
    pub receive_failures: u64,
}

impl IngestReport {
    fn record(&mut self, outcome: MessageOutcome) {
        self.received += 1;
        match outcome {
            MessageOutcome::Saved(_) => self.saved += 1,
            MessageOutcome::DecodeFailed => self.decode_failures += 1,
            MessageOutcome::SaveFailed => self.save_failures += 1,
        }
    }
}

enum Step {
    Signal { sender_alive: bool },
    Message(Result<Option<Vec<u8>>, SourceError>),
}

/// Turns a stream of serialized recipes into stored recipes.
///
/// Run one pipeline task per stream; each task keeps at most one save in
/// flight.
#[derive(Clone)]
pub struct IngestionPipeline {
    store: Arc<dyn RecipeStore>,
}

impl IngestionPipeline {
    /// Create a pipeline writing into `store`.
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Decode and save a single message, logging and swallowing failures.
    pub async fn process_message(&self, payload: &[u8]) -> MessageOutcome {
        let recipe = match decode_recipe(payload) {
            Ok(recipe) => recipe,
            Err(e) => {
                warn!("Dropping undecodable message ({} bytes): {}", payload.len(), e);
                return MessageOutcome::DecodeFailed;
            }
        };

        match self.store.save(&recipe).await {
            Ok(saved) => {
                debug!(
                    "Stored recipe {} '{}' ({} ingredients)",
                    saved.id,
                    saved.name,
                    saved.ingredients.len()
                );
                MessageOutcome::Saved(saved.id)
            }
            Err(e) => {
                error!("Dropping recipe '{}': {}", recipe.name, e);
                MessageOutcome::SaveFailed
            }
        }
    }

    /// Consume `source` until cancelled or exhausted.
    ///
    /// # Arguments
    /// * `source` - The stream to consume
    /// * `shutdown` - Cancellation signal. A value of `true` stops the loop, as
    ///   does dropping the sending half.
    ///
    /// # Returns
    /// * `Ok(IngestReport)` - The loop stopped cleanly
    /// * `Err(IngestError)` - The source failed in a way that cannot recover
    pub async fn run<S>(
        &self,
        mut source: S,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<IngestReport, IngestError>
    where
        S: MessageSource,
    {
        let mut report = IngestReport::default();
        info!("Ingestion started on {}", source.name());

        loop {
            if *shutdown.borrow_and_update() {
                info!("Ingestion on {} cancelled", source.name());
                break;
            }

            let step = tokio::select! {
                biased;
                changed = shutdown.changed() => Step::Signal { sender_alive: changed.is_ok() },
                next = source.next_message() => Step::Message(next),
            };

            match step {
                Step::Signal { sender_alive: true } => continue,
                Step::Signal { sender_alive: false } => {
                    info!("Ingestion on {} lost its shutdown handle, stopping", source.name());
                    break;
                }
                Step::Message(Ok(Some(payload))) => {
                    let outcome = self.process_message(&payload).await;
                    report.record(outcome);
                }
                Step::Message(Ok(None)) => {
                    info!("Source {} exhausted", source.name());
                    break;
                }
                Step::Message(Err(SourceError::Receive(reason))) => {
                    report.receive_failures += 1;
                    warn!("Error consuming from {}: {}", source.name(), reason);
                }
                Step::Message(Err(e)) => {
                    error!("Source {} failed: {}", source.name(), e);
                    return Err(e.into());
                }
            }
        }

        info!(
            "Ingestion on {} finished: received={}, saved={}, decode_failures={}, save_failures={}, receive_failures={}",
            source.name(),
            report.received,
            report.saved,
            report.decode_failures,
            report.save_failures,
            report.receive_failures
        );
        Ok(report)
    }

    /// Run the pipeline as a background task.
    pub fn spawn<S>(
        &self,
        source: S,
        shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<Result<IngestReport, IngestError>>
    where
        S: MessageSource + 'static,
    {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.run(source, shutdown).await })
    }
}
