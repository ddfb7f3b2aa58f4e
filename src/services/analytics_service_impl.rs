//! [`AnalyticsService`] over any [`CatalogStore`].

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Datelike;
use tracing::debug;

use crate::analytics::{self, Insight};
use crate::domain::{FilterSpec, TitleKind, TitleQuery};
use crate::models::{
    CatalogSummary, CatalogTitle, CountryStat, GenreStat, ScatterPoint, SearchResults,
    TimelinePoint, TitleDto, TitleList,
};
use crate::services::analytics_service::{
    AnalyticsError, AnalyticsService, MIN_SEARCH_LEN, ResultLimits,
};
use crate::services::catalog_store::{CatalogStore, TitlePage};

/// Summary fallback when the catalog has no titles.
const EMPTY_CATALOG_MIN_YEAR: i32 = 1900;
const NOT_AVAILABLE: &str = "N/A";

pub struct CatalogAnalyticsService {
    store: Arc<dyn CatalogStore>,
    limits: ResultLimits,
}

impl CatalogAnalyticsService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, limits: ResultLimits) -> Self {
        Self { store, limits }
    }

    #[must_use]
    pub const fn limits(&self) -> &ResultLimits {
        &self.limits
    }

    async fn matching(&self, query: &TitleQuery) -> Result<Vec<CatalogTitle>, AnalyticsError> {
        let titles = self.store.fetch_titles(query, &TitlePage::all()).await?;
        debug!(matched = titles.len(), "Fetched matching titles");
        Ok(titles)
    }
}

/// Highest usage count; the first entry wins a tie.
fn most_used(usage: Vec<(String, u64)>) -> Option<String> {
    usage
        .into_iter()
        .fold(None, |best: Option<(String, u64)>, (name, n)| match best {
            Some(b) if b.1 >= n => Some(b),
            _ => Some((name, n)),
        })
        .map(|(name, _)| name)
}

#[async_trait::async_trait]
impl AnalyticsService for CatalogAnalyticsService {
    async fn summary(&self) -> Result<CatalogSummary, AnalyticsError> {
        let all = TitleQuery::all();
        let movies = TitleQuery {
            kinds: BTreeSet::from([TitleKind::Movie]),
            ..TitleQuery::all()
        };
        let tv_shows = TitleQuery {
            kinds: BTreeSet::from([TitleKind::TvShow]),
            ..TitleQuery::all()
        };

        let (
            total_titles,
            total_movies,
            total_tv_shows,
            total_genres,
            total_countries,
            bounds,
            genre_usage,
            country_usage,
        ) = tokio::try_join!(
            self.store.count_titles(&all),
            self.store.count_titles(&movies),
            self.store.count_titles(&tv_shows),
            self.store.count_genres(),
            self.store.count_countries(),
            self.store.release_year_bounds(),
            self.store.genre_usage(),
            self.store.country_usage(),
        )?;

        let year_range = bounds.map_or_else(
            || [EMPTY_CATALOG_MIN_YEAR, chrono::Utc::now().year()],
            |(min, max)| [min, max],
        );

        Ok(CatalogSummary {
            total_titles,
            total_movies,
            total_tv_shows,
            total_genres,
            total_countries,
            year_range,
            top_genre: most_used(genre_usage).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            top_country: most_used(country_usage).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    }

    async fn timeline(&self, filter: &FilterSpec) -> Result<Vec<TimelinePoint>, AnalyticsError> {
        let titles = self.matching(&filter.to_query()).await?;
        Ok(analytics::timeline(&titles))
    }

    async fn genres(&self, filter: &FilterSpec) -> Result<Vec<GenreStat>, AnalyticsError> {
        let titles = self.matching(&filter.without_genres().to_query()).await?;
        Ok(analytics::genre_stats(&titles))
    }

    async fn countries(&self, filter: &FilterSpec) -> Result<Vec<CountryStat>, AnalyticsError> {
        let titles = self
            .matching(&filter.without_countries().to_query())
            .await?;
        Ok(analytics::country_stats(&titles, filter.country_mode))
    }

    async fn scatter(
        &self,
        filter: &FilterSpec,
        limit: Option<u64>,
    ) -> Result<Vec<ScatterPoint>, AnalyticsError> {
        let limit = self.limits.scatter(limit);
        let titles = self
            .store
            .fetch_titles(&filter.to_query(), &TitlePage::first(limit))
            .await?;
        Ok(analytics::scatter(&titles, filter.country_mode))
    }

    async fn search(
        &self,
        query: &str,
        limit: Option<u64>,
    ) -> Result<SearchResults, AnalyticsError> {
        let needle = query.trim();
        if needle.chars().count() < MIN_SEARCH_LEN {
            return Ok(SearchResults {
                results: Vec::new(),
            });
        }

        let limit = self.limits.search(limit);
        let titles = self
            .store
            .fetch_titles(
                &TitleQuery::name_search(needle),
                &TitlePage::newest_first(limit, 0),
            )
            .await?;

        debug!(needle, hits = titles.len(), "Search completed");
        Ok(SearchResults {
            results: titles.into_iter().map(TitleDto::from).collect(),
        })
    }

    async fn insights(&self, filter: &FilterSpec) -> Result<Vec<Insight>, AnalyticsError> {
        let titles = self.matching(&filter.to_query()).await?;
        Ok(analytics::insights::generate(&titles, filter.country_mode))
    }

    async fn titles(
        &self,
        filter: &FilterSpec,
        limit: Option<u64>,
        offset: u64,
    ) -> Result<TitleList, AnalyticsError> {
        let limit = self.limits.titles(limit);
        let query = filter.to_query();
        let page = TitlePage::newest_first(limit, offset);

        let (titles, total) = tokio::try_join!(
            self.store.fetch_titles(&query, &page),
            self.store.count_titles(&query),
        )?;

        Ok(TitleList {
            titles: titles.into_iter().map(TitleDto::from).collect(),
            total,
            limit,
            offset,
        })
    }

    async fn health(&self) -> Result<(), AnalyticsError> {
        Ok(self.store.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog_store::MemoryCatalog;

    fn service(titles: Vec<CatalogTitle>) -> CatalogAnalyticsService {
        CatalogAnalyticsService::new(
            Arc::new(MemoryCatalog::new(titles)),
            ResultLimits::default(),
        )
    }

    #[tokio::test]
    async fn empty_catalog_summary_uses_fallbacks() {
        let summary = service(Vec::new()).summary().await.unwrap();
        assert_eq!(summary.total_titles, 0);
        assert_eq!(summary.year_range[0], 1900);
        assert_eq!(summary.year_range[1], chrono::Utc::now().year());
        assert_eq!(summary.top_genre, "N/A");
        assert_eq!(summary.top_country, "N/A");
    }

    #[tokio::test]
    async fn short_search_needle_returns_nothing() {
        let svc = service(vec![
            CatalogTitle::builder(1, "s1", TitleKind::Movie, "Up", 2009).build(),
        ]);
        assert!(svc.search(" u ", None).await.unwrap().results.is_empty());
        assert_eq!(svc.search("up", None).await.unwrap().results.len(), 1);
    }

    #[test]
    fn most_used_prefers_first_on_tie() {
        let usage = vec![
            ("Dramas".to_string(), 4),
            ("Comedies".to_string(), 7),
            ("Thrillers".to_string(), 7),
        ];
        assert_eq!(most_used(usage), Some("Comedies".to_string()));
        assert_eq!(most_used(Vec::new()), None);
    }
}
