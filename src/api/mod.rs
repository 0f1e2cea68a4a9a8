pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::queue::JobQueue;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub queue: Arc<dyn JobQueue>,
    pub default_region: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/reviews",
            post(routes::reviews::create_review).get(routes::reviews::list_reviews),
        )
        .route("/reviews/{review_id}", get(routes::reviews::get_review))
        // Unknown paths and unknown methods both answer 404.
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Resource not found"})))
}
