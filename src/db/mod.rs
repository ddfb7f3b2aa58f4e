use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::TitleQuery;
use crate::models::{CatalogRow, CatalogTitle};
use crate::services::catalog_store::{CatalogStore, StoreError, TitlePage};

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::SeedCounts;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    /// Replaces the whole catalog. This is the only write path.
    pub async fn replace_catalog(&self, rows: &[CatalogRow]) -> Result<SeedCounts> {
        self.catalog_repo().replace(rows).await
    }

    pub async fn is_catalog_empty(&self) -> Result<bool> {
        Ok(self.catalog_repo().count(&TitleQuery::all()).await? == 0)
    }
}

#[async_trait::async_trait]
impl CatalogStore for Store {
    async fn count_titles(&self, query: &TitleQuery) -> Result<u64, StoreError> {
        Ok(self.catalog_repo().count(query).await?)
    }

    async fn fetch_titles(
        &self,
        query: &TitleQuery,
        page: &TitlePage,
    ) -> Result<Vec<CatalogTitle>, StoreError> {
        Ok(self.catalog_repo().fetch(query, page).await?)
    }

    async fn count_genres(&self) -> Result<u64, StoreError> {
        Ok(self.catalog_repo().count_genres().await?)
    }

    async fn count_countries(&self) -> Result<u64, StoreError> {
        Ok(self.catalog_repo().count_countries().await?)
    }

    async fn release_year_bounds(&self) -> Result<Option<(i32, i32)>, StoreError> {
        Ok(self.catalog_repo().release_year_bounds().await?)
    }

    async fn genre_usage(&self) -> Result<Vec<(String, u64)>, StoreError> {
        Ok(self.catalog_repo().genre_usage().await?)
    }

    async fn country_usage(&self) -> Result<Vec<(String, u64)>, StoreError> {
        Ok(self.catalog_repo().country_usage().await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(Self::ping(self).await?)
    }
}
