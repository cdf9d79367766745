use augur::config::{Config, SourceKind};
use augur::services::{Cache, PredictionSession};
use augur::sources::{DrawSource, SimulatedSource, WinGoClient};
use augur::AppState;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let source: Arc<dyn DrawSource> = match config.source {
        SourceKind::Live => {
            info!("Using WinGo history at {}", config.api_url);
            Arc::new(WinGoClient::new(config.api_url.clone(), config.fetch_timeout()))
        }
        SourceKind::Simulated => {
            let source = match config.simulation.seed {
                Some(seed) => SimulatedSource::new(config.simulation.history_len, seed),
                None => SimulatedSource::random(config.simulation.history_len),
            };
            info!("Using simulated draws (seed {})", source.seed());
            Arc::new(source)
        }
    };

    let cache = Arc::new(Cache::new(config.prediction_ttl()));
    let session = PredictionSession::new(source, cache, config.session());
    info!(
        "Model bank ready with {} models, min {} draws per prediction",
        session.bank().len(),
        session.config().min_records
    );

    let addr = format!("{}:{}", config.host, config.port);
    let app = augur::app(AppState::new(config, session));

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
