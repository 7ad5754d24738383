//! Repo Steward webhook service
//!
//! # Environment Variables
//!
//! - `API_HOST` / `API_PORT`: Bind address (default: 0.0.0.0:8080)
//! - `GITHUB_WEBHOOK_SECRET`: Secret used to verify webhook signatures
//! - `GITHUB_TOKEN`: Token authentication
//! - `GITHUB_APP_ID`, `GITHUB_APP_PRIVATE_KEY` / `GITHUB_APP_PRIVATE_KEY_PATH`: GitHub App authentication
//! - `BOT_LOGIN`: Login the bot posts as
//! - `SWEEP_INTERVAL_SECS`: Seconds between repository sweeps, 0 disables (default: 86400)
//! - `SWEEP_REPOSITORIES`: Comma separated `owner/repo` list swept in token mode
//! - `STEWARD_CONFIG`: Path of the TOML config file (default: steward.toml)
//! - `RUST_LOG`: Log filter (default: info)
//! - `LOG_FORMAT`: `text` or `json` (default: text)

use anyhow::Context;
use repo_steward_api::{ApiServer, AppConfig, AppState, ClientProvider};
use repo_steward_core::{Dispatcher, Scheduler};
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let provider = Arc::new(
        ClientProvider::from_credentials(&config.credentials, &config.sweep.repositories)
            .await
            .context("Failed to create the GitHub client")?,
    );

    let dispatcher = Arc::new(Dispatcher::from_settings(config.bot));

    if config.webhook_secret.is_none() {
        tracing::warn!("No webhook secret configured, deliveries are not verified");
    }

    let state = AppState::new(dispatcher.clone(), provider.clone(), config.webhook_secret);
    let mut server = ApiServer::new(config.server, state);

    match config.sweep.interval() {
        Some(period) => {
            tracing::info!(period_secs = period.as_secs(), "Repository sweeps enabled");
            server = server.with_scheduler(Scheduler::new(dispatcher, provider, period));
        }
        None => tracing::info!("Repository sweeps disabled"),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Repo Steward");

    server.serve().await
}
