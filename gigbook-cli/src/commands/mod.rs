//! Command implementations for the gigbook CLI

pub mod migrate;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use clap::Parser;
use gigbook_server::Store;

use crate::config::AppConfig;

pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

/// Database selection shared by commands that only talk to storage
#[derive(Parser, Debug)]
pub struct DbArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Open the pool described by `config` and bring the schema up to date.
pub(crate) async fn connect_and_migrate(config: &AppConfig, url_flag: Option<String>) -> Result<Store> {
    let db_config = config.database_config(url_flag)?;
    let store = Store::connect(&db_config)
        .await
        .context("Failed to create database pool")?;
    gigbook_server::db::migrations::run(store.pool())
        .await
        .context("Failed to run migrations")?;
    Ok(store)
}
