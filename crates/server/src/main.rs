//! # rollcall-server
//!
//! HTTP API over the class attendance spreadsheet.

mod config;
mod error;
mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use routes::{create_router, AppState};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let client = config
        .build_client()
        .context("Failed to set up the Sheets client")?;
    let app = create_router(AppState::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!(
        addr = %config.bind,
        spreadsheet = %config.spreadsheet_id,
        "rollcall-server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
