pub mod sqlite;

pub use sqlite::SqliteQueue;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::WardenError;
use crate::models::ReviewRecord;

/// A queued review job. Pure delivery vehicle: lifecycle state lives only in
/// the review store, never on the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewJob {
    pub review_id: String,
    pub aws_account_id: String,
    pub region: String,
    pub pillars: Vec<String>,
    pub timestamp: String,
}

impl ReviewJob {
    pub fn from_record(record: &ReviewRecord) -> Self {
        Self {
            review_id: record.review_id.clone(),
            aws_account_id: record.aws_account_id.clone(),
            region: record.region.clone(),
            pillars: record.pillars.clone(),
            timestamp: record.timestamp.clone(),
        }
    }
}

/// One delivery of a queued job.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub message_id: String,
    /// Carried beside the body for filtering, mirroring a message attribute.
    pub review_id: String,
    pub body: String,
    pub receive_count: u32,
}

impl QueueMessage {
    pub fn job(&self) -> Result<ReviewJob, WardenError> {
        serde_json::from_str(&self.body)
            .map_err(|e| WardenError::Parse(format!("Malformed review job payload: {}", e)))
    }
}

/// At-least-once delivery between the API and the worker. Received messages
/// become invisible for a timeout and reappear unless acknowledged.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: &ReviewJob) -> Result<(), WardenError>;

    /// Receive up to `max_messages` currently visible messages.
    async fn receive(&self, max_messages: usize) -> Result<Vec<QueueMessage>, WardenError>;

    /// Delete a processed message. Unacknowledged messages are redelivered
    /// after the visibility timeout.
    async fn acknowledge(&self, message_id: &str) -> Result<(), WardenError>;

    /// Number of messages currently stored, visible or not.
    async fn depth(&self) -> Result<usize, WardenError>;
}
