//! Summary command handler

use std::sync::Arc;

use crate::analytics::insights::group_thousands;
use crate::config::Config;
use crate::db::Store;
use crate::models::CatalogSummary;
use crate::services::{AnalyticsService, CatalogAnalyticsService};

pub async fn cmd_summary(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let service = CatalogAnalyticsService::new(Arc::new(store), config.result_limits());

    let summary = service.summary().await?;
    print_summary(&summary);
    Ok(())
}

pub fn print_summary(summary: &CatalogSummary) {
    println!("Catalog Summary");
    println!("{:-<50}", "");
    println!("  Titles:     {}", group_thousands(summary.total_titles));
    println!("  Movies:     {}", group_thousands(summary.total_movies));
    println!("  TV Shows:   {}", group_thousands(summary.total_tv_shows));
    println!("  Genres:     {}", summary.total_genres);
    println!("  Countries:  {}", summary.total_countries);
    println!(
        "  Years:      {} - {}",
        summary.year_range[0], summary.year_range[1]
    );
    println!("  Top genre:  {}", summary.top_genre);
    println!("  Top country: {}", summary.top_country);
}
