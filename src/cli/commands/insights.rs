//! Insights command handler

use std::sync::Arc;

use crate::analytics::{Insight, InsightKind};
use crate::cli::FilterArgs;
use crate::config::Config;
use crate::db::Store;
use crate::services::{AnalyticsService, CatalogAnalyticsService};

pub async fn cmd_insights(config: &Config, filter: &FilterArgs) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let service = CatalogAnalyticsService::new(Arc::new(store), config.result_limits());

    let insights = service.insights(&filter.to_spec()).await?;
    print_insights(&insights);
    Ok(())
}

pub fn print_insights(insights: &[Insight]) {
    println!("Insights");
    println!("{:-<60}", "");
    for insight in insights {
        let marker = match insight.kind {
            InsightKind::Info => "•",
            InsightKind::Trend => "↗",
            InsightKind::Highlight => "★",
        };
        println!("{marker} {}", insight.title);
        println!("  {}", insight.text);
    }
}
