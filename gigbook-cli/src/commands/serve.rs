//! HTTP server command
//!
//! Connects, migrates, optionally seeds, then serves until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use gigbook_server::db::seed_if_empty;
use gigbook_server::run_server;

use super::connect_and_migrate;
use crate::config::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Load sample listings when the database has no venues
    #[arg(long)]
    pub seed: bool,
}

/// Run the HTTP server
pub async fn run_serve(config: &AppConfig, args: ServeArgs) -> Result<()> {
    let server_config = config.server_config(args.bind, args.cors_permissive);
    let store = connect_and_migrate(config, args.database_url).await?;

    if args.seed {
        let report = seed_if_empty(&store).await.context("Failed to seed database")?;
        tracing::info!(
            venues = report.venues,
            artists = report.artists,
            shows = report.shows,
            "seed finished"
        );
    }

    tracing::info!("Starting gigbook server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, server_config).await.context("Server error")?;

    Ok(())
}
