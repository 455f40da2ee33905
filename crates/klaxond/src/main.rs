//! Klaxond - Alarm relay daemon
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (bind 127.0.0.1:8080, in-memory storage)
//! klaxond
//!
//! # Run with a config file
//! klaxond --config configs/klaxon.toml
//! ```

mod serve;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Klaxond - Alarm relay daemon
#[derive(Parser, Debug)]
#[command(name = "klaxond")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    serve::run(cli.config, cli.log_level).await
}

/// Initialize the tracing subscriber for logging
pub(crate) fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
