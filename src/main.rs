//! Storefront gateway binary.
//!
//! Boots the session-bridging proxy and payment endpoint:
//! load config → init logging/metrics → bind → serve until signalled.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use oscar_gateway::config::load_config;
use oscar_gateway::lifecycle::Shutdown;
use oscar_gateway::observability::{logging, metrics};
use oscar_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "oscar-gateway", about = "Storefront gateway for the Oscar backend")]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.api_base,
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
