//! Offline report: CSV straight into an in-memory catalog.

use std::path::Path;
use std::sync::Arc;

use crate::cli::FilterArgs;
use crate::cli::commands::{print_insights, print_summary};
use crate::config::Config;
use crate::services::{AnalyticsService, CatalogAnalyticsService, CsvCatalogLoader, MemoryCatalog};

pub async fn cmd_report(config: &Config, csv: &str, filter: &FilterArgs) -> anyhow::Result<()> {
    let loaded = CsvCatalogLoader::load_path(Path::new(csv)).await?;
    if loaded.skipped > 0 {
        println!("Skipped {} malformed or duplicate rows", loaded.skipped);
    }

    let catalog = MemoryCatalog::from_rows(loaded.rows);
    let service = CatalogAnalyticsService::new(Arc::new(catalog), config.result_limits());

    let summary = service.summary().await?;
    print_summary(&summary);
    println!();

    let insights = service.insights(&filter.to_spec()).await?;
    print_insights(&insights);
    Ok(())
}
