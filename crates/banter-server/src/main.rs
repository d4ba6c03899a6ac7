//! Banter server binary.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default port
//! banter-server
//!
//! # Custom bind address and verbose logging
//! banter-server --bind 0.0.0.0:9000 --log-level debug
//! ```

use banter_server::{Server, ServerRuntimeConfig};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Banter chat service server
#[derive(Parser, Debug)]
#[command(name = "banter-server")]
#[command(about = "Multi-room chat service with invite-secret authentication")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:7450")]
    bind: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("banter server starting");
    tracing::info!("binding to {}", args.bind);

    let server = Server::bind(ServerRuntimeConfig { bind_address: args.bind }).await?;

    tracing::info!("server listening on {}", server.local_addr()?);

    server.run().await?;

    Ok(())
}
