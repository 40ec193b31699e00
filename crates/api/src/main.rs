//! Alert Summarizer - Main Entry Point

use alert_api::{init_logging, run_server, ServiceConfig, TracingLog};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    info!("=== Alert Summarizer v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config, Arc::new(TracingLog)).await?;

    Ok(())
}
