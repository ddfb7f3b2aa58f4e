use serde::{Deserialize, Serialize};

use super::TitleDto;
use crate::domain::{TitleId, TitleKind};

/// Per-genre breakdown. Raw rows are merged into canonical buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenreStat {
    pub name: String,
    pub count: u64,
    pub avg_year: i32,
    pub movie_count: u64,
    pub tv_show_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub year: i32,
    pub movies: u64,
    pub tv_shows: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub country: String,
    pub iso: Option<String>,
    pub count: u64,
    pub movie_count: u64,
    pub tv_show_count: u64,
    pub top_genres: Vec<String>,
}

/// One dot of the duration scatter chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub id: TitleId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TitleKind,
    pub release_year: i32,
    pub genre: String,
    pub country: String,
    pub duration: Option<u32>,
}

/// Catalog-wide totals, independent of any filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_titles: u64,
    pub total_movies: u64,
    #[serde(rename = "totalTVShows")]
    pub total_tv_shows: u64,
    pub total_genres: u64,
    pub total_countries: u64,
    pub year_range: [i32; 2],
    pub top_genre: String,
    pub top_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    pub results: Vec<TitleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleList {
    pub titles: Vec<TitleDto>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}
