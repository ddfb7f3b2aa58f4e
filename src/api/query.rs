//! Query-string contract shared by the dashboard endpoints.
//!
//! Every field arrives as text and is parsed leniently: a value that does not
//! parse behaves as if it were absent, and a repeated key keeps its last
//! value. There is no 400 path.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::{CountryMode, FilterSpec, TitleKind, YearRange};
use crate::services::ingest::split_listing;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub genres: Option<String>,
    pub countries: Option<String>,
    pub types: Option<String>,
    pub year_min: Option<String>,
    pub year_max: Option<String>,
    pub country_mode: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub q: Option<String>,
}

impl FilterParams {
    /// Builds params from decoded `key=value` pairs. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "genres" => &mut params.genres,
                "countries" => &mut params.countries,
                "types" => &mut params.types,
                "yearMin" => &mut params.year_min,
                "yearMax" => &mut params.year_max,
                "countryMode" => &mut params.country_mode,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "q" => &mut params.q,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    #[must_use]
    pub fn filter_spec(&self) -> FilterSpec {
        let list = |v: &Option<String>| v.as_deref().map(split_listing).unwrap_or_default();

        let types = self
            .types
            .as_deref()
            .map(|raw| raw.split(',').filter_map(TitleKind::parse).collect())
            .unwrap_or_default();

        FilterSpec {
            genres: list(&self.genres),
            countries: list(&self.countries),
            types,
            years: YearRange::new(
                parse_year(self.year_min.as_deref()).unwrap_or(YearRange::UNBOUNDED_MIN),
                parse_year(self.year_max.as_deref()).unwrap_or(YearRange::UNBOUNDED_MAX),
            ),
            country_mode: self
                .country_mode
                .as_deref()
                .map(CountryMode::parse)
                .unwrap_or_default(),
        }
    }

    /// Requested row count. Negative numbers read as 0 and are clamped later.
    #[must_use]
    pub fn limit(&self) -> Option<u64> {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|n| u64::try_from(n).unwrap_or(0))
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for FilterParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.uri.query().map(Self::from_query).unwrap_or_default())
    }
}

fn parse_year(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse().ok())
}
