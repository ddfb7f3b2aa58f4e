//! Read-side contract of the title catalog.
//!
//! Aggregations never reach for a global handle: they are given an
//! `Arc<dyn CatalogStore>`. [`crate::db::Store`] implements it over SQLite;
//! [`MemoryCatalog`] implements it over a `Vec` for tests and offline reports.

use std::collections::HashSet;

use thiserror::Error;

use crate::analytics::Tally;
use crate::domain::{TitleId, TitleQuery};
use crate::models::{CatalogRow, CatalogTitle};

/// Failure of the underlying data store. Never retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Data store unavailable: {0}")]
    Unavailable(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleOrder {
    /// Ingestion order.
    #[default]
    Catalog,
    /// Newest release first, ingestion order within a year.
    ReleaseYearDesc,
}

/// Sort and window for [`CatalogStore::fetch_titles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TitlePage {
    pub order: TitleOrder,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl TitlePage {
    /// Every matching title, ingestion order.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            order: TitleOrder::Catalog,
            limit: None,
            offset: 0,
        }
    }

    #[must_use]
    pub const fn first(limit: u64) -> Self {
        Self {
            order: TitleOrder::Catalog,
            limit: Some(limit),
            offset: 0,
        }
    }

    #[must_use]
    pub const fn newest_first(limit: u64, offset: u64) -> Self {
        Self {
            order: TitleOrder::ReleaseYearDesc,
            limit: Some(limit),
            offset,
        }
    }
}

#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    async fn count_titles(&self, query: &TitleQuery) -> Result<u64, StoreError>;

    /// Matching titles with their genre and country associations loaded.
    async fn fetch_titles(
        &self,
        query: &TitleQuery,
        page: &TitlePage,
    ) -> Result<Vec<CatalogTitle>, StoreError>;

    async fn count_genres(&self) -> Result<u64, StoreError>;

    async fn count_countries(&self) -> Result<u64, StoreError>;

    /// `(min, max)` release year, or `None` for an empty catalog.
    async fn release_year_bounds(&self) -> Result<Option<(i32, i32)>, StoreError>;

    /// Association count per genre, in ingestion order.
    async fn genre_usage(&self) -> Result<Vec<(String, u64)>, StoreError>;

    /// Association count per country (every association, not only primary).
    async fn country_usage(&self) -> Result<Vec<(String, u64)>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    titles: Vec<CatalogTitle>,
}

impl MemoryCatalog {
    #[must_use]
    pub const fn new(titles: Vec<CatalogTitle>) -> Self {
        Self { titles }
    }

    /// Assigns ids `1..` in row order.
    #[must_use]
    pub fn from_rows(rows: Vec<CatalogRow>) -> Self {
        let titles = rows
            .into_iter()
            .zip(1..)
            .map(|(row, id)| row.into_title(TitleId::new(id)))
            .collect();
        Self { titles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalog {
    async fn count_titles(&self, query: &TitleQuery) -> Result<u64, StoreError> {
        Ok(self.titles.iter().filter(|t| query.matches(t)).count() as u64)
    }

    async fn fetch_titles(
        &self,
        query: &TitleQuery,
        page: &TitlePage,
    ) -> Result<Vec<CatalogTitle>, StoreError> {
        let mut matched: Vec<&CatalogTitle> =
            self.titles.iter().filter(|t| query.matches(t)).collect();

        if page.order == TitleOrder::ReleaseYearDesc {
            matched.sort_by(|a, b| b.release_year.cmp(&a.release_year));
        }

        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = page
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_genres(&self) -> Result<u64, StoreError> {
        let distinct: HashSet<&str> = self
            .titles
            .iter()
            .flat_map(|t| t.genres.iter().map(String::as_str))
            .collect();
        Ok(distinct.len() as u64)
    }

    async fn count_countries(&self) -> Result<u64, StoreError> {
        let distinct: HashSet<&str> = self
            .titles
            .iter()
            .flat_map(|t| t.countries.iter().map(|c| c.name.as_str()))
            .collect();
        Ok(distinct.len() as u64)
    }

    async fn release_year_bounds(&self) -> Result<Option<(i32, i32)>, StoreError> {
        let min = self.titles.iter().map(|t| t.release_year).min();
        let max = self.titles.iter().map(|t| t.release_year).max();
        Ok(min.zip(max))
    }

    async fn genre_usage(&self) -> Result<Vec<(String, u64)>, StoreError> {
        let mut tally = Tally::new();
        for genre in self.titles.iter().flat_map(|t| t.genres.iter()) {
            tally.add(genre.clone());
        }
        Ok(tally.iter().map(|(name, n)| (name.clone(), n)).collect())
    }

    async fn country_usage(&self) -> Result<Vec<(String, u64)>, StoreError> {
        let mut tally = Tally::new();
        for link in self.titles.iter().flat_map(|t| t.countries.iter()) {
            tally.add(link.name.clone());
        }
        Ok(tally.iter().map(|(name, n)| (name.clone(), n)).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterSpec, TitleKind};

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            CatalogTitle::builder(1, "s1", TitleKind::Movie, "Alpha", 2001)
                .genres(vec!["Dramas".into()])
                .countries(vec!["India".into()])
                .build(),
            CatalogTitle::builder(2, "s2", TitleKind::TvShow, "Beta", 2019)
                .genres(vec!["TV Dramas".into(), "Crime TV Shows".into()])
                .countries(vec!["India".into(), "France".into()])
                .build(),
            CatalogTitle::builder(3, "s3", TitleKind::Movie, "Gamma", 2019).build(),
        ])
    }

    #[tokio::test]
    async fn fetch_orders_and_windows() {
        let store = catalog();
        let all = TitleQuery::all();

        let newest = store
            .fetch_titles(&all, &TitlePage::newest_first(2, 0))
            .await
            .unwrap();
        let names: Vec<&str> = newest.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Gamma"]);

        let skipped = store
            .fetch_titles(&all, &TitlePage::newest_first(10, 2))
            .await
            .unwrap();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].name, "Alpha");
    }

    #[tokio::test]
    async fn counts_and_usage() {
        let store = catalog();
        assert_eq!(store.count_genres().await.unwrap(), 3);
        assert_eq!(store.count_countries().await.unwrap(), 2);
        assert_eq!(store.release_year_bounds().await.unwrap(), Some((2001, 2019)));
        assert_eq!(
            store.country_usage().await.unwrap(),
            vec![("India".to_string(), 2), ("France".to_string(), 1)]
        );

        let spec = FilterSpec {
            genres: vec!["Drama".into()],
            ..FilterSpec::default()
        };
        assert_eq!(store.count_titles(&spec.to_query()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn empty_catalog_has_no_bounds() {
        let store = MemoryCatalog::default();
        assert!(store.is_empty());
        assert_eq!(store.release_year_bounds().await.unwrap(), None);
        assert!(store.genre_usage().await.unwrap().is_empty());
    }
}
