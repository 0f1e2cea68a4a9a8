use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::WardenError;
use crate::pipeline::{AnalysisPipeline, ReviewTask};
use crate::queue::ReviewJob;

/// Fixed action tag carried on every analysis invocation payload.
pub const REVIEW_ACTION: &str = "perform_well_architected_review";

/// Invocation payload handed to the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPayload {
    pub review_id: String,
    pub aws_account_id: String,
    pub region: String,
    pub pillars: Vec<String>,
    pub action: String,
}

impl DispatchPayload {
    pub fn for_job(job: &ReviewJob) -> Self {
        Self {
            review_id: job.review_id.clone(),
            aws_account_id: job.aws_account_id.clone(),
            region: job.region.clone(),
            pillars: job.pillars.clone(),
            action: REVIEW_ACTION.to_string(),
        }
    }
}

/// Acknowledgment of an asynchronous dispatch. `accepted` means the pipeline
/// run started, nothing more.
#[derive(Debug, Clone)]
pub struct DispatchAck {
    pub accepted: bool,
    pub detail: Option<String>,
}

impl DispatchAck {
    pub fn accept() -> Self {
        Self { accepted: true, detail: None }
    }

    pub fn reject(detail: impl Into<String>) -> Self {
        Self { accepted: false, detail: Some(detail.into()) }
    }
}

/// One-way hand-off of an analysis run. Callers must not wait for pipeline
/// completion through this seam; the review record is the only completion
/// channel.
#[async_trait]
pub trait PipelineDispatcher: Send + Sync {
    async fn dispatch(&self, payload: DispatchPayload) -> Result<DispatchAck, WardenError>;
}

/// Dispatches the pipeline onto the runtime as a detached task.
pub struct SpawnDispatcher {
    pipeline: Arc<AnalysisPipeline>,
}

impl SpawnDispatcher {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl PipelineDispatcher for SpawnDispatcher {
    async fn dispatch(&self, payload: DispatchPayload) -> Result<DispatchAck, WardenError> {
        if payload.action != REVIEW_ACTION {
            return Ok(DispatchAck::reject(format!("unknown action: {}", payload.action)));
        }

        let pipeline = self.pipeline.clone();
        let task = ReviewTask {
            review_id: payload.review_id,
            aws_account_id: payload.aws_account_id,
            region: payload.region,
            pillars: payload.pillars,
        };

        // The join handle is dropped: completion is reported only through
        // the review record. Two dispatches for the same review can race;
        // the store's last write wins.
        tokio::spawn(async move {
            if let Err(e) = pipeline.run(&task).await {
                error!(review_id = %task.review_id, error = %e, "Analysis run ended with unrecorded error");
            }
        });

        Ok(DispatchAck::accept())
    }
}
