//! Courtboard Web Server Binary
//!
//! This binary starts the Courtboard web server that provides a REST API
//! for the court layout editor and the weekly sign-up lists.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, configured data directory)
//! courtboard-web
//!
//! # Specify port and data directory
//! courtboard-web --port 8080 --data-dir ~/club-data
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtboard::config::Config;
use courtboard::web;

/// Courtboard Web Server - REST API for courts and sign-ups
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding the data files.
    /// Defaults to the configured data directory, or the platform config dir:
    /// - Linux: ~/.config/Courtboard/data/
    /// - macOS: ~/Library/Application Support/Courtboard/data/
    /// - Windows: %APPDATA%\Courtboard\data\
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring unreadable configuration: {e:#}");
            Config::default()
        }
    };

    let data_dir = config.resolve_data_dir(args.data_dir.as_deref())?;
    info!("Data directory: {}", data_dir.display());

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    // Start the server
    web::run_server(config, data_dir, addr).await
}
