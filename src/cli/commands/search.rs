//! Search command handler

use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AnalyticsService, CatalogAnalyticsService, MIN_SEARCH_LEN};

pub async fn cmd_search(config: &Config, query: &str, limit: Option<u64>) -> anyhow::Result<()> {
    if query.trim().chars().count() < MIN_SEARCH_LEN {
        println!("Search needs at least {MIN_SEARCH_LEN} characters.");
        return Ok(());
    }

    let store = Store::new(&config.general.database_path).await?;
    let service = CatalogAnalyticsService::new(Arc::new(store), config.result_limits());

    let found = service.search(query, limit).await?;
    if found.results.is_empty() {
        println!("No titles found matching '{query}'");
        return Ok(());
    }

    println!("Search Results:");
    println!("{:-<60}", "");
    for title in &found.results {
        println!("{} ({}) [{}]", title.title, title.release_year, title.kind.as_str());
        if !title.genres.is_empty() {
            println!("    {}", title.genres.join(", "));
        }
        if let Some(duration) = &title.duration {
            println!("    {duration}");
        }
    }

    Ok(())
}
