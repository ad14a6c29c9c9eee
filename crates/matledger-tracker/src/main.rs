mod app;
mod commands;
mod form;
mod render;

use std::io;

use anyhow::Result;
use matledger_core::EventStore;
use matledger_platform::TrackerConfig;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "matledger_tracker=info".to_string()),
        )
        .with_writer(io::stderr)
        .init();

    let config = TrackerConfig::from_env()?;
    info!(output = ?config.output, "material tracker ready, type `help` for commands");

    let stdin = io::stdin();
    let session = app::run(&config, stdin.lock(), io::stdout().lock())?;

    info!(
        materials = session.materials().len(),
        events = session.events().all().len(),
        "session closed"
    );

    Ok(())
}
