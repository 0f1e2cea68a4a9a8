use serde::{Deserialize, Serialize};

use super::finding::Finding;
use super::recommendation::Recommendation;
use crate::utils::time::now_ts;

/// Review lifecycle state.
///
/// PENDING -> IN_PROGRESS -> COMPLETED | FAILED for a single pipeline run;
/// a redelivered job may overwrite a terminal status because the store is
/// last-write-wins per review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::InProgress => "IN_PROGRESS",
            ReviewStatus::Completed => "COMPLETED",
            ReviewStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<ReviewStatus> {
        match s {
            "PENDING" => Some(ReviewStatus::Pending),
            "IN_PROGRESS" => Some(ReviewStatus::InProgress),
            "COMPLETED" => Some(ReviewStatus::Completed),
            "FAILED" => Some(ReviewStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStatus::Completed | ReviewStatus::Failed)
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted review record, keyed by (review_id, timestamp).
///
/// A review resubmitted under the same id gets a fresh timestamped entry;
/// status updates always target the latest entry and historical entries are
/// never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub review_id: String,
    pub timestamp: String,
    pub status: ReviewStatus,
    pub aws_account_id: String,
    pub region: String,
    pub pillars: Vec<String>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ReviewRecord {
    pub fn new(review_id: &str, aws_account_id: &str, region: &str, pillars: Vec<String>) -> Self {
        let ts = now_ts();
        Self {
            review_id: review_id.to_string(),
            timestamp: ts.clone(),
            status: ReviewStatus::Pending,
            aws_account_id: aws_account_id.to_string(),
            region: region.to_string(),
            pillars,
            findings: Vec::new(),
            recommendations: Vec::new(),
            score: None,
            error_message: None,
            created_at: ts.clone(),
            updated_at: ts,
        }
    }
}
