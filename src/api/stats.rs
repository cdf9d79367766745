use super::format_millis;
use crate::error::Result;
use crate::types::DrawStats;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: DrawStats,
    pub execution_time: String,
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let started = Instant::now();
    let stats = state.session.stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
        execution_time: format_millis(started.elapsed()),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}
