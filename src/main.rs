//! CWA Open-Data Proxy binary.
//!
//! Startup order follows fail-fast: parse CLI, load and validate config,
//! initialize logging and metrics, bind the listener, then serve.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cwa_proxy::config;
use cwa_proxy::observability;
use cwa_proxy::HttpServer;

/// Forwarding proxy for the CWA open-data API.
#[derive(Debug, Parser)]
#[command(name = "cwa-proxy", version, about)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. "127.0.0.1:8080").
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    observability::logging::init(&config.observability.log_level);

    tracing::info!("cwa-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        api_key_present = !config.upstream.api_key.is_empty(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
