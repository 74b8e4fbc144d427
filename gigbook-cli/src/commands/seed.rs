//! Load sample venues, artists and shows into an empty database

use anyhow::{Context, Result};
use gigbook_server::db::seed_if_empty;

use super::{connect_and_migrate, DbArgs};
use crate::config::AppConfig;

pub async fn run_seed(config: &AppConfig, args: DbArgs) -> Result<()> {
    let store = connect_and_migrate(config, args.database_url).await?;
    let report = seed_if_empty(&store).await.context("Failed to seed database")?;

    if report.is_empty() {
        println!("Database already has venues, nothing seeded");
    } else {
        println!(
            "Seeded {} venues, {} artists, {} shows",
            report.venues, report.artists, report.shows
        );
    }
    Ok(())
}
