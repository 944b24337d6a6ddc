mod config;
mod dashboard;
mod errors;
mod models;
mod profile;
mod routes;
mod state;
mod timeline;

use anyhow::{Context, Result};
use chrono::Local;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dashboard::session::InMemorySessionStore;
use crate::profile::assets::ProfileAssets;
use crate::profile::loader::load_catalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV dashboard v{}", env!("CARGO_PKG_VERSION"));

    // Profile document: a broken document is fatal, the dashboard cannot render without it
    let today = Local::now().date_naive();
    let catalog = load_catalog(config.cv_data_path.as_deref(), config.now_policy, today)
        .await
        .context("Failed to load profile document")?;

    // Optional images: photo and QR fall back to placeholders
    let assets = ProfileAssets::resolve(&config.assets_dir).await;
    info!("Assets resolved from {}", config.assets_dir.display());

    info!("Session limit: {}", config.max_sessions);

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        assets: Arc::new(assets),
        sessions: Arc::new(InMemorySessionStore::new(config.max_sessions)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
