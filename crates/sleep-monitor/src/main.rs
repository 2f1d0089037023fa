//! DozeGuard Monitor - Main Entry Point

mod config;
mod control;
mod source;

use anyhow::Context;
use crate::config::{AppConfig, VisionSource};
use serial_link::SerialLink;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vision_bridge::ResultSlot;

/// Initialize logging
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== DozeGuard Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let app_config = AppConfig::load().context("Failed to load configuration")?;
    app_config
        .estimator()
        .validate()
        .context("Invalid estimator configuration")?;

    let link = match &app_config.serial_device {
        Some(device) => SerialLink::open(device, app_config.baud())
            .with_context(|| format!("Failed to open device link on {}", device))?,
        None => {
            info!("No serial device configured, using mock link");
            SerialLink::mock()
        }
    };

    let slot = ResultSlot::new();
    match app_config.source {
        VisionSource::Stdin => {
            tokio::spawn(source::feed_from_stdin(slot.clone()));
        }
        VisionSource::Simulated => {
            tokio::spawn(source::feed_simulated(slot.clone()));
        }
    }

    control::run(&app_config, slot, link).await
}
