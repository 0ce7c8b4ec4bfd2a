//! Callboard API Server
//!
//! Run with: cargo run --bin callboard
//!
//! # Configuration
//!
//! Loaded from `callboard.toml` (or the platform config directory) with
//! environment overrides:
//! - `CALLBOARD_HOST` / `CALLBOARD_PORT`: bind address
//! - `CALLBOARD_DB`: SQLite database path (empty = no-op query mode)
//! - `CALLBOARD_SCHEMA` / `CALLBOARD_TABLE`: target table
//! - `CALLBOARD_TIME_COLUMN` / `CALLBOARD_METRIC_COLUMN`: whitelisted columns
//! - `CALLBOARD_WINDOW_MINUTES`: time window width
//! - `CALLBOARD_BACKEND_MODE`: local or http
//! - `CALLBOARD_BACKEND_URL`: remote instance URL for http mode
//! - `RUST_LOG`: log filter override

use callboard::api::{serve, AppState};
use callboard::config::{Config, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting callboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Target table: {}.{} ({}, {})",
        config.report.schema,
        config.report.table,
        config.report.time_column,
        config.report.metric_column
    );
    if config.database.connection_string.is_empty() {
        tracing::info!("No database configured, queries return zero rows");
    } else {
        tracing::info!("Database: {}", config.database.connection_string);
    }

    let state = AppState::new(config.clone());

    tracing::info!(
        "Starting server on {}:{}",
        config.server.host,
        config.server.port
    );
    serve(state, &config.server).await?;

    tracing::info!("Callboard server stopped");
    Ok(())
}

/// Install the tracing subscriber from logging config
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("callboard={},tower_http=debug", logging.level).into()
    });

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
