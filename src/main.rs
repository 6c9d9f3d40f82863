//! adventure-log server entry point.
//!
//! Starts the Axum HTTP server for snapshot ingestion and retrieval.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use adventure_log::api;
use adventure_log::api::dto::Projector;
use adventure_log::app_state::AppState;
use adventure_log::config::AppConfig;
use adventure_log::persistence::{self, SnapshotRepository};
use adventure_log::service::SnapshotService;
use adventure_log::storage::PhotoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting adventure-log");

    // Storage first, then the repository over it, then the service.
    let pool = persistence::connect(&config).await?;
    let photo_store = PhotoStore::new(config.upload_dir.clone()).await?;
    let repository = SnapshotRepository::new(pool);
    let service = Arc::new(SnapshotService::new(repository, photo_store));
    let projector = Arc::new(Projector::new(&config.public_base_url));

    let app_state = AppState { service, projector };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
