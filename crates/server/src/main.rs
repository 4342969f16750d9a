//! Imprint server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use imprint_core::config::AppConfig;
use imprint_notify::NotifierHandle;
use imprint_queue::{PrintQueue, TrackingIndex};
use imprint_server::{AppState, create_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Imprint - a print-job queue server
#[derive(Parser, Debug)]
#[command(name = "imprintd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "IMPRINT_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("Imprint v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // Check for IMPRINT_ environment variables (excluding IMPRINT_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("IMPRINT_") && key != "IMPRINT_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: imprintd --config /path/to/config.toml\n  \
             2. Environment variables: IMPRINT_SERVER__BIND=0.0.0.0:8080 imprintd\n\n\
             See config/server.example.toml for example configuration.\n\
             Set IMPRINT_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("IMPRINT_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Register Prometheus metrics
    imprint_server::metrics::register_metrics();
    tracing::info!("Prometheus metrics registered");

    // Initialize the content store
    let content = imprint_store::from_config(&config.store)
        .context("failed to initialize content store")?;
    tracing::info!(backend = content.backend_name(), "Content store initialized");

    // Initialize the queue and tracking index
    let queue = Arc::new(PrintQueue::new());
    let index = Arc::new(TrackingIndex::new());

    // Spawn the notification consumer task
    let notifier_impl = imprint_notify::from_config(&config.notify);
    let (notifier, _notifier_task) = NotifierHandle::spawn(notifier_impl);
    tracing::info!("Notification dispatcher spawned");

    // Create application state
    let state = AppState::new(config.clone(), content, queue, index, notifier);

    // Create router
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
