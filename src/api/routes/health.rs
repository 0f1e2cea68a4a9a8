use axum::Json;

use crate::api::models::HealthResponse;
use crate::utils::time::now_ts;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: now_ts(),
        service: "warden",
    })
}
