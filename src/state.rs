use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::db::Store;
use crate::services::{AnalyticsService, CatalogAnalyticsService, CatalogStore, seed_store};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub analytics: Arc<dyn AnalyticsService>,
}

impl SharedState {
    /// Connects to the database and wires the analytics service over it.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let catalog: Arc<dyn CatalogStore> = Arc::new(store.clone());
        let analytics: Arc<dyn AnalyticsService> = Arc::new(CatalogAnalyticsService::new(
            catalog,
            config.result_limits(),
        ));

        Self {
            config: Arc::new(config),
            store,
            analytics,
        }
    }

    /// Seeds from the configured CSV when enabled and the catalog is empty.
    ///
    /// A missing or unreadable CSV is logged, not fatal: the service still
    /// answers with an empty catalog.
    pub async fn seed_if_empty(&self) -> anyhow::Result<()> {
        if !self.config.catalog.seed_on_startup {
            return Ok(());
        }

        if !self.store.is_catalog_empty().await? {
            return Ok(());
        }

        let path = std::path::Path::new(&self.config.catalog.csv_path);
        match seed_store(&self.store, path).await {
            Ok(counts) => {
                info!(
                    titles = counts.titles,
                    genres = counts.genres,
                    countries = counts.countries,
                    "Seeded empty catalog"
                );
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Startup seed skipped");
            }
        }

        Ok(())
    }
}
