//! Origin shim (v1)
//!
//! Serves edge requests from one configured origin.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http server ─▶ body buffer ─▶ descriptor   │
//!                         │                                   │          │
//!                         │                                   ▼          │
//!                         │                            ┌────────────┐    │
//!                         │                            │   Origin   │────┼──▶ directory
//!                         │                            │  resolver  │────┼──▶ http(s) upstream
//!                         │                            └─────┬──────┘    │
//!                         │                                  ▼           │
//!     Client Response     │                      header/body translation │
//!     ◀───────────────────┼──  http response ◀── or error mapping        │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use origin_shim::config::{load_config, validate_config, ConfigError, ShimConfig};
use origin_shim::observability;
use origin_shim::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "origin-shim")]
#[command(about = "Serve edge requests from a directory or an HTTP origin", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Origin base URL or directory; empty selects the no-op origin.
    #[arg(short, long, env = "ORIGIN_BASE_URL")]
    origin: Option<String>,

    /// Listen address, e.g. 127.0.0.1:8080.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ShimConfig::default(),
    };
    if let Some(origin) = cli.origin {
        config.origin.base_url = origin;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    observability::logging::init(&config.observability)?;

    tracing::info!("origin-shim v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.origin.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
