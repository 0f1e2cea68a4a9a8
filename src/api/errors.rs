use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::errors::WardenError;

impl IntoResponse for WardenError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            WardenError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            WardenError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // Internal detail is logged, never returned to the caller.
            _ => {
                error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
