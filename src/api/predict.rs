//! Prediction endpoint.

use super::format_millis;
use crate::error::Result;
use crate::types::{IssueId, LatestDraw, Outcome, OutcomeCounts, SessionResult, WinLoss};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::time::{Duration, Instant};

pub const DISCLAIMER: &str =
    "For educational purposes only. No algorithm can guarantee random outcomes.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    pub message: String,
    pub previous_result: Option<WinLoss>,
    pub next_prediction: NextPredictionView,
    pub performance: PerformanceView,
    pub latest_drawn: LatestDraw,
    pub disclaimer: &'static str,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPredictionView {
    pub result: Outcome,
    /// Percentage string, e.g. `"67%"`.
    pub confidence: String,
    pub for_issue: IssueId,
    pub based_on_models: usize,
    pub model_breakdown: OutcomeCounts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceView {
    pub historical_accuracy: String,
    pub tested_on: usize,
    pub correct_predictions: usize,
    pub data_points_analyzed: usize,
    pub execution_time: String,
}

impl PredictResponse {
    pub fn new(result: SessionResult, elapsed: Duration) -> Self {
        let message = match &result.win_loss {
            Some(verdict) => format!("Previous prediction: {}!", verdict.status.label()),
            None => "First prediction - no previous data to compare".to_string(),
        };

        Self {
            success: true,
            message,
            previous_result: result.win_loss,
            next_prediction: NextPredictionView {
                result: result.next.prediction,
                confidence: format!("{}%", result.next.confidence),
                for_issue: result.next.for_issue,
                based_on_models: result.next.total_votes,
                model_breakdown: result.next.breakdown,
            },
            performance: PerformanceView {
                historical_accuracy: format!("{}%", result.accuracy.rate),
                tested_on: result.accuracy.tested,
                correct_predictions: result.accuracy.correct,
                data_points_analyzed: result.data_points,
                execution_time: format_millis(elapsed),
            },
            latest_drawn: result.latest,
            disclaimer: DISCLAIMER,
            timestamp: result.timestamp,
        }
    }
}

async fn predict(State(state): State<AppState>) -> Result<Json<PredictResponse>> {
    let started = Instant::now();
    let result = state.session.run().await?;
    Ok(Json(PredictResponse::new(result, started.elapsed())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/predict", get(predict))
        .route("/api", get(predict))
}
