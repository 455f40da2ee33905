//! Server assembly and run loop

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use klaxon_api::{build_router, ApiState};
use klaxon_classify::Classifier;
use klaxon_config::Config;
use klaxon_live::LiveHub;
use klaxon_pipeline::{spawn_bootstrap_listener, Broadcast, IngestPipeline};
use klaxon_storage::{AlarmRepository, MemoryRepository};
use klaxon_store::RecentStore;

/// Run the daemon
pub async fn run(config_path: Option<PathBuf>, log_level: Option<String>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;

    // CLI flag overrides file config
    let level = log_level.unwrap_or_else(|| config.log.level.clone());
    crate::init_logging(&level)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        config = %config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(default)".to_string()),
        "klaxond starting"
    );

    if let Err(e) = run_server(config).await {
        error!(error = %e, "server error");
        return Err(e);
    }

    info!("klaxond shutdown complete");
    Ok(())
}

/// Load configuration, falling back to defaults when no file is present
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            // Explicitly provided config path must exist
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::load(path).context("failed to load configuration")
        }
        None => {
            let default_paths = [
                PathBuf::from("configs/klaxon.toml"),
                PathBuf::from("klaxon.toml"),
            ];

            for path in &default_paths {
                if path.exists() {
                    return Config::load(path).context("failed to load configuration");
                }
            }

            Ok(Config::default())
        }
    }
}

/// Main server run loop
async fn run_server(config: Config) -> Result<()> {
    let bind = config.api.bind_addr().context("invalid bind address")?;
    let bootstrap_window = config
        .bootstrap
        .window()
        .context("invalid bootstrap window")?;

    // Assemble the pipeline and its collaborators
    let store = Arc::new(RecentStore::with_config(config.store.store_config()));
    let repository: Arc<dyn AlarmRepository> = Arc::new(MemoryRepository::new());
    let hub = Arc::new(LiveHub::new());

    let pipeline = Arc::new(
        IngestPipeline::builder(
            Arc::clone(&repository),
            Arc::clone(&store),
            Arc::clone(&hub) as Arc<dyn Broadcast>,
        )
        .classifier(Classifier::new(config.classifier.rule))
        .durability(config.pipeline.durability)
        .bootstrap_window(bootstrap_window.duration())
        .bootstrap_source(config.bootstrap.source)
        .build(),
    );

    // The hub hands out its join channel exactly once
    let joins = hub
        .join_notices()
        .context("join channel already claimed")?;
    let bootstrap_task = spawn_bootstrap_listener(Arc::clone(&pipeline), joins);

    let state = Arc::new(ApiState {
        pipeline,
        store,
        repository,
        hub,
    });

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    info!(
        address = %bind,
        durability = ?config.pipeline.durability,
        bootstrap_source = ?config.bootstrap.source,
        bootstrap_window = %bootstrap_window,
        "klaxond server running"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("server error")?;

    info!("shutdown signal received, stopping server");
    bootstrap_task.abort();

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
