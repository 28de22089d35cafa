//! Quill Server - Multi-user blogging backend.
//!
//! This is the main entry point for running a Quill server.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_api::{create_router, AppState};

mod config;

use config::Config;

/// Quill Server - Multi-user blogging backend
#[derive(Parser, Debug)]
#[command(name = "quill-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API listen address
    #[arg(long)]
    api_addr: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(api_addr) = args.api_addr {
        config.api_addr = api_addr;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("quill={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Quill server");
    tracing::info!(api_addr = %config.api_addr, "Server configuration");

    let state = AppState::new();
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.api_addr).await?;
    tracing::info!(addr = %config.api_addr, "Quill server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
