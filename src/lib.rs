//! Augur - ensemble BIG/SMALL prediction server for one-minute digit draws

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::PredictionSession;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<PredictionSession>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, session: PredictionSession) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(session),
            started_at: Instant::now(),
        }
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
