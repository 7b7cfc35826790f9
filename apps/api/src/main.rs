mod config;
mod errors;
mod extraction;
mod jobs;
mod models;
mod routes;
mod sheets;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::sheets::SheetsClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing spreadsheet id)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Tracker v{}", env!("CARGO_PKG_VERSION"));

    if config.sheets.service_account_email.is_none() || config.sheets.private_key.is_none() {
        warn!("Google service account credentials are not set; saving jobs will fail");
    }

    let sheets = SheetsClient::new(config.sheets.clone()).context("Failed to build Sheets client")?;
    info!(
        "Sheets client initialized (tab: {})",
        config.sheets.tab_name
    );

    let state = AppState {
        appender: Arc::new(sheets),
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
