pub mod health;
pub mod predict;
pub mod stats;

use crate::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use serde_json::json;

const AVAILABLE_ENDPOINTS: [&str; 3] = [
    "/api/predict - Get next prediction with win/loss tracking",
    "/api/stats - Get current statistics",
    "/api/health - Health check",
];

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(predict::router())
        .merge(stats::router())
        .fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}

/// Whole milliseconds, rendered the way clients expect (`"12ms"`).
pub(crate) fn format_millis(elapsed: std::time::Duration) -> String {
    format!("{}ms", elapsed.as_millis())
}
