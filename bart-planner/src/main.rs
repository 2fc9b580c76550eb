use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bart_planner::bart::BartClient;
use bart_planner::config::AppConfig;
use bart_planner::stations::StationDirectory;
use bart_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bart_planner=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    if config.request_timeout.is_none() {
        warn!("BART_TIMEOUT_SECS not set; upstream requests have no timeout");
    }

    let directory = Arc::new(StationDirectory::bart().expect("Invalid station table"));
    info!(stations = directory.len(), "loaded station directory");

    let bart = BartClient::new(config.bart()).expect("Failed to create BART client");
    info!(base_url = bart.base_url(), "using BART prediction API");

    let state = AppState::new(directory, bart);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("BART Trip Planner listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/stations         - List stations");
    info!("  GET  /api/stations/search  - Search stations by name");
    info!("  GET  /api/stations/:code   - Look up a station code");
    info!("  POST /trip                 - Predictions and alerts for a trip");
    info!("  GET  /trip/latest          - Most recent trip results");

    axum::serve(listener, app).await.expect("Server error");
}
