pub mod dispatcher;

pub use dispatcher::{DispatchAck, DispatchPayload, PipelineDispatcher, SpawnDispatcher};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::errors::WardenError;
use crate::models::ReviewStatus;
use crate::queue::{JobQueue, QueueMessage};
use crate::utils::truncation::truncate_error;

/// Message ids from one batch, split by outcome. Failed ids are reported
/// back so the queue redelivers exactly those.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Consumes review jobs and hands each off to the analysis pipeline.
///
/// A job is done once its dispatch is acknowledged, not when the pipeline
/// finishes; pipeline completion is observable only through the review
/// record.
pub struct ReviewWorker {
    db: Database,
    queue: Arc<dyn JobQueue>,
    dispatcher: Arc<dyn PipelineDispatcher>,
}

impl ReviewWorker {
    pub fn new(
        db: Database,
        queue: Arc<dyn JobQueue>,
        dispatcher: Arc<dyn PipelineDispatcher>,
    ) -> Self {
        Self { db, queue, dispatcher }
    }

    /// Process one batch with per-item isolation: one message's failure
    /// never blocks or fails the others.
    pub async fn process_batch(&self, messages: &[QueueMessage]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for message in messages {
            match self.process_message(message).await {
                Ok(()) => outcome.succeeded.push(message.message_id.clone()),
                Err(e) => {
                    warn!(
                        message_id = %message.message_id,
                        review_id = %message.review_id,
                        error = %e,
                        "Review job failed"
                    );
                    outcome.failed.push(message.message_id.clone());
                }
            }
        }
        outcome
    }

    async fn process_message(&self, message: &QueueMessage) -> Result<(), WardenError> {
        let job = message.job()?;
        debug!(
            review_id = %job.review_id,
            message_id = %message.message_id,
            receive_count = message.receive_count,
            "Processing review job"
        );

        // The record is the source of truth; a missing record means the job
        // is orphaned. That is logged and processing continues. The
        // transition is idempotent: a redelivered job simply overwrites
        // status and timestamp.
        match self
            .db
            .update_review_status(&job.review_id, ReviewStatus::InProgress, None)
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(review_id = %job.review_id, "No review record found for IN_PROGRESS transition")
            }
            Err(e) => {
                self.record_failure(&job.review_id, &format!("Error processing review: {}", e));
                return Err(e);
            }
        }

        let payload = DispatchPayload::for_job(&job);
        let ack = match self.dispatcher.dispatch(payload).await {
            Ok(ack) => ack,
            Err(e) => {
                self.record_failure(&job.review_id, &format!("Analysis dispatch failed: {}", e));
                return Err(e);
            }
        };

        if !ack.accepted {
            let reason = ack.detail.unwrap_or_else(|| "no detail given".to_string());
            let message_text = format!("Analysis dispatch was not accepted: {}", reason);
            self.record_failure(&job.review_id, &message_text);
            return Err(WardenError::Dispatch(message_text));
        }

        debug!(review_id = %job.review_id, "Analysis dispatched");
        Ok(())
    }

    /// Best effort: a failure to record the failure must not mask the
    /// original error.
    fn record_failure(&self, review_id: &str, message: &str) {
        if let Err(e) =
            self.db
                .update_review_status(review_id, ReviewStatus::Failed, Some(&truncate_error(message)))
        {
            warn!(review_id = %review_id, error = %e, "Could not record FAILED status");
        }
    }

    /// Poll loop: receive a batch, process it, acknowledge the successes.
    /// Failed messages stay on the queue for redelivery after the visibility
    /// timeout.
    pub async fn run(
        &self,
        poll_interval: Duration,
        batch_size: usize,
        cancel: CancellationToken,
    ) {
        info!(
            poll_secs = poll_interval.as_secs(),
            batch_size, "Review worker started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            match self.queue.receive(batch_size).await {
                Ok(messages) if !messages.is_empty() => {
                    let received = messages.len();
                    let outcome = self.process_batch(&messages).await;
                    for message_id in &outcome.succeeded {
                        if let Err(e) = self.queue.acknowledge(message_id).await {
                            warn!(message_id = %message_id, error = %e, "Could not acknowledge message");
                        }
                    }
                    info!(
                        received,
                        succeeded = outcome.succeeded.len(),
                        failed = outcome.failed.len(),
                        "Batch processed"
                    );
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Queue receive failed"),
            }

            let jitter = Duration::from_secs_f64(rand::random::<f64>());
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(poll_interval + jitter) => {}
            }
        }

        info!("Review worker stopped");
    }
}
