//! Dashboard aggregations as a service.
//!
//! Each operation takes a [`FilterSpec`], reads the matching titles from a
//! [`CatalogStore`](crate::services::CatalogStore) and reduces them with
//! [`crate::analytics`]. Handlers and CLI commands only translate input and
//! output.

use thiserror::Error;

use crate::analytics::Insight;
use crate::domain::FilterSpec;
use crate::models::{
    CatalogSummary, CountryStat, GenreStat, ScatterPoint, SearchResults, TimelinePoint, TitleList,
};
use crate::services::catalog_store::StoreError;

/// Shortest search needle that is sent to the store.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Data store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for AnalyticsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}

/// Default and maximum row counts per projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    pub scatter_default: u64,
    pub scatter_max: u64,
    pub titles_default: u64,
    pub titles_max: u64,
    pub search_default: u64,
    pub search_max: u64,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            scatter_default: 1000,
            scatter_max: 5000,
            titles_default: 500,
            titles_max: 5000,
            search_default: 10,
            search_max: 20,
        }
    }
}

impl ResultLimits {
    /// Missing means default; anything else is clamped into `1..=max`.
    #[must_use]
    pub fn clamp(requested: Option<u64>, default: u64, max: u64) -> u64 {
        requested.unwrap_or(default).clamp(1, max.max(1))
    }

    #[must_use]
    pub fn scatter(&self, requested: Option<u64>) -> u64 {
        Self::clamp(requested, self.scatter_default, self.scatter_max)
    }

    #[must_use]
    pub fn titles(&self, requested: Option<u64>) -> u64 {
        Self::clamp(requested, self.titles_default, self.titles_max)
    }

    #[must_use]
    pub fn search(&self, requested: Option<u64>) -> u64 {
        Self::clamp(requested, self.search_default, self.search_max)
    }
}

#[async_trait::async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Catalog-wide totals; ignores any filter.
    async fn summary(&self) -> Result<CatalogSummary, AnalyticsError>;

    async fn timeline(&self, filter: &FilterSpec) -> Result<Vec<TimelinePoint>, AnalyticsError>;

    /// Consolidated genre breakdown. The filter's genre restriction is ignored.
    async fn genres(&self, filter: &FilterSpec) -> Result<Vec<GenreStat>, AnalyticsError>;

    /// Country breakdown under the filter's country mode. The filter's
    /// country restriction is ignored.
    async fn countries(&self, filter: &FilterSpec) -> Result<Vec<CountryStat>, AnalyticsError>;

    async fn scatter(
        &self,
        filter: &FilterSpec,
        limit: Option<u64>,
    ) -> Result<Vec<ScatterPoint>, AnalyticsError>;

    /// Title-name search, newest first. Needles shorter than
    /// [`MIN_SEARCH_LEN`] return nothing.
    async fn search(&self, query: &str, limit: Option<u64>)
    -> Result<SearchResults, AnalyticsError>;

    async fn insights(&self, filter: &FilterSpec) -> Result<Vec<Insight>, AnalyticsError>;

    /// One page of matching titles, newest first, with the total match count.
    async fn titles(
        &self,
        filter: &FilterSpec,
        limit: Option<u64>,
        offset: u64,
    ) -> Result<TitleList, AnalyticsError>;

    async fn health(&self) -> Result<(), AnalyticsError>;
}
