use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod blob_store;
mod config;
mod dedup;
mod doc_template;
mod docgen;
mod format;
mod intake;
mod property_store;
mod record_store;
mod server;
mod sheet_export;
mod telemetry;
mod traits;
mod types;
mod workbook;

use config::BaseConfig;
use intake::IntakeService;
use server::WebhookServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize telemetry
    telemetry::init();
    info!("Starting formsmith");

    // Parse configuration from CLI arguments
    let config = BaseConfig::parse();
    info!(
        "Configuration: bind_addr={}, dedup_path={}, output_dir={}",
        config.bind_addr, config.dedup_path, config.output_dir
    );

    // Wire the production adapters and run the webhook server
    let service = Arc::new(IntakeService::initialize(&config)?);
    let mut server = WebhookServer::new(config.bind_addr.clone(), service);
    server.open().await?;

    tokio::signal::ctrl_c().await?;
    server.close().await?;

    info!("Formsmith shutdown complete");
    Ok(())
}
