use serde::{Deserialize, Serialize};

use crate::models::{ReviewRecord, ReviewStatus};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub aws_account_id: Option<String>,
    pub region: Option<String>,
    pub pillars: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewResponse {
    pub review_id: String,
    pub status: ReviewStatus,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    #[serde(rename = "nextToken")]
    pub next_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsResponse {
    pub items: Vec<ReviewRecord>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}
