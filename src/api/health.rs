use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

pub const SERVICE_NAME: &str = "WinGo Prediction Engine";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Active draw source, `live` or `simulated`.
    source: &'static str,
    /// Seconds since the server started.
    uptime_secs: f64,
    timestamp: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        source: state.config.source.label(),
        uptime_secs: state.started_at.elapsed().as_secs_f64(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            service: SERVICE_NAME,
            version: "1.0.0",
            source: "simulated",
            uptime_secs: 1.5,
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("\"uptimeSecs\":1.5"));
        assert!(json.contains("\"source\":\"simulated\""));
        assert!(json.contains("\"service\":\"WinGo Prediction Engine\""));
    }
}
