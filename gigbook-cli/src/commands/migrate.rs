//! Create or update the schema, then exit

use anyhow::Result;

use super::{connect_and_migrate, DbArgs};
use crate::config::AppConfig;

pub async fn run_migrate(config: &AppConfig, args: DbArgs) -> Result<()> {
    connect_and_migrate(config, args.database_url).await?;
    println!("Schema is up to date");
    Ok(())
}
