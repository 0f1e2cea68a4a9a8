use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info};

use crate::api::models::{
    CreateReviewRequest, CreateReviewResponse, ListQuery, ListReviewsResponse,
};
use crate::api::AppState;
use crate::db::PageCursor;
use crate::errors::WardenError;
use crate::models::{ReviewRecord, ReviewStatus};
use crate::queue::ReviewJob;

const MAX_PAGE_SIZE: usize = 100;

pub async fn create_review(
    State(state): State<AppState>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), WardenError> {
    let Json(req) = payload
        .map_err(|_| WardenError::Validation("Invalid JSON in request body".to_string()))?;

    let aws_account_id = match req.aws_account_id.as_deref().map(str::trim) {
        Some(account) if !account.is_empty() => account.to_string(),
        _ => return Err(WardenError::Validation("awsAccountId is required".to_string())),
    };
    let region = req
        .region
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| state.default_region.clone());
    let pillars = req
        .pillars
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| vec!["all".to_string()]);

    let review_id = uuid::Uuid::new_v4().to_string();
    let record = ReviewRecord::new(&review_id, &aws_account_id, &region, pillars);

    // The record write happens-before the enqueue.
    state.db.create_review(&record)?;

    let job = ReviewJob::from_record(&record);
    if let Err(e) = state.queue.enqueue(&job).await {
        error!(review_id = %review_id, error = %e, "Could not enqueue review job");
        // Compensating transition: without a queued job the record would sit
        // PENDING forever.
        if let Err(se) = state.db.update_review_status(
            &review_id,
            ReviewStatus::Failed,
            Some("Review could not be queued for processing"),
        ) {
            error!(review_id = %review_id, error = %se, "Could not record enqueue failure");
        }
        return Err(e);
    }

    info!(review_id = %review_id, account = %aws_account_id, region = %region, "Created review");

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            review_id,
            status: ReviewStatus::Pending,
            message: "Review initiated successfully".to_string(),
        }),
    ))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<ReviewRecord>, WardenError> {
    state
        .db
        .latest_review(&review_id)?
        .map(Json)
        .ok_or_else(|| WardenError::NotFound("Review not found".to_string()))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListReviewsResponse>, WardenError> {
    let limit = query.limit.unwrap_or(20).clamp(1, MAX_PAGE_SIZE);
    let cursor = query
        .next_token
        .as_deref()
        .map(PageCursor::decode)
        .transpose()?;

    let page = state.db.list_reviews(limit, cursor.as_ref())?;
    Ok(Json(ListReviewsResponse {
        count: page.items.len(),
        items: page.items,
        next_token: page.next.map(|c| c.encode()),
    }))
}
