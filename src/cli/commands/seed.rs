//! Seed command handler

use std::path::Path;

use crate::config::Config;
use crate::db::Store;
use crate::services::seed_store;

pub async fn cmd_seed(config: &Config, csv: Option<&str>) -> anyhow::Result<()> {
    let path = csv.unwrap_or(&config.catalog.csv_path);
    let store = Store::new(&config.general.database_path).await?;

    println!("Loading catalog from {path}...");
    let counts = seed_store(&store, Path::new(path)).await?;

    println!(
        "✓ Seeded {} titles, {} genres, {} countries",
        counts.titles, counts.genres, counts.countries
    );
    Ok(())
}
