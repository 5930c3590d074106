//! Brewmap server binary.

use anyhow::{Context, Result};
use brewmap_core::AppConfig;
use brewmap_server::{AppState, create_router};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Brewmap - a cafe directory API server
#[derive(Parser, Debug)]
#[command(name = "brewmapd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "BREWMAP_CONFIG",
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
    tracing::info!("Brewmap v{}", env!("CARGO_PKG_VERSION"));

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

    // Check for BREWMAP_ environment variables (excluding BREWMAP_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("BREWMAP_") && key != "BREWMAP_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: brewmapd --config /path/to/config.toml\n  \
             2. Environment variables: BREWMAP_SERVER__BIND=0.0.0.0:8080 \
             BREWMAP_ADMIN__API_KEY=YOUR_KEY_HERE brewmapd\n\n\
             See config/server.example.toml for example configuration.\n\
             Set BREWMAP_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("BREWMAP_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    if let Err(e) = config.validate() {
        anyhow::bail!("invalid configuration: {e}");
    }

    // Open the record store, creating the database file if absent
    let store = brewmap_store::from_config(&config.store)
        .await
        .context("failed to open record store")?;
    store
        .health_check()
        .await
        .context("record store health check failed")?;
    tracing::info!(path = %config.store.path.display(), "Record store ready");

    // Create application state and router
    let state = AppState::new(config.clone(), store);
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
