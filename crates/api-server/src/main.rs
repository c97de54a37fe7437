//! API Server for the task ledger
//!
//! Serves the task listing plus CSV export and import over REST.

mod config;
mod error;
mod routes;
mod state;
mod upload;

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tasks_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Using data directory: {:?}", config.data_dir);
    tracing::info!("CSV upload limit: {} bytes", config.max_csv_size);

    let app_state = AppState::new(&config)
        .await
        .context("Failed to initialize application state")?;

    let app = routes::app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("REST API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
