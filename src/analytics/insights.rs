//! Human-readable statistics derived from one filtered selection.
//!
//! The pipeline is fixed: an empty selection yields a single `no-data`
//! record, otherwise each insight below is computed independently and
//! appended in order. Ties always resolve to the first value encountered
//! while walking the selection.

use serde::{Deserialize, Serialize};

use super::aggregate::Tally;
use crate::domain::{CountryMode, TitleKind};
use crate::models::CatalogTitle;

/// Releases from this year on count as recent.
pub const RECENT_SINCE: i32 = 2015;

/// Distinct recent years needed before the recent-trend insight is reported.
pub const MIN_RECENT_YEARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Trend,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightValue {
    Number(i64),
    Text(String),
}

impl From<u64> for InsightValue {
    fn from(n: u64) -> Self {
        Self::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<i32> for InsightValue {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u32> for InsightValue {
    fn from(n: u32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<String> for InsightValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub kind: InsightKind,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<InsightValue>,
}

impl Insight {
    fn new(
        id: &str,
        kind: InsightKind,
        title: &str,
        text: String,
        value: Option<InsightValue>,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            text,
            value,
        }
    }
}

/// Runs the insight pipeline over `titles`.
#[must_use]
pub fn generate(titles: &[CatalogTitle], mode: CountryMode) -> Vec<Insight> {
    let total = titles.len() as u64;

    if total == 0 {
        return vec![Insight::new(
            "no-data",
            InsightKind::Info,
            "No Data",
            "No titles match the current filters. Try adjusting your selection.".to_string(),
            None,
        )];
    }

    let movies = titles.iter().filter(|t| t.kind == TitleKind::Movie).count() as u64;
    let tv_shows = total - movies;

    let mut genres: Tally<&str> = Tally::new();
    let mut years: Tally<i32> = Tally::new();
    let mut countries: Tally<&str> = Tally::new();

    for title in titles {
        for genre in &title.genres {
            genres.add(genre.as_str());
        }
        years.add(title.release_year);
        for link in title.countries_for(mode.is_primary()) {
            countries.add(link.name.as_str());
        }
    }

    let mut insights = vec![Insight::new(
        "total-count",
        InsightKind::Info,
        "Content Overview",
        format!(
            "Showing {} titles: {} movies and {} TV shows.",
            group_thousands(total),
            group_thousands(movies),
            group_thousands(tv_shows)
        ),
        Some(total.into()),
    )];

    if let Some((genre, count)) = genres.top() {
        insights.push(Insight::new(
            "top-genre",
            InsightKind::Highlight,
            "Dominant Genre",
            format!(
                "{genre} is the most common genre, appearing in {}% of the selected titles.",
                percent(count, total)
            ),
            Some(genre.to_string().into()),
        ));
    }

    if let Some((year, count)) = years.top() {
        insights.push(Insight::new(
            "peak-year",
            InsightKind::Trend,
            "Peak Year",
            format!(
                "{year} had the highest content output with {} titles.",
                group_thousands(count)
            ),
            Some((*year).into()),
        ));
    }

    if let Some((country, count)) = countries.top() {
        insights.push(Insight::new(
            "top-country",
            InsightKind::Highlight,
            "Leading Producer",
            format!(
                "{country} leads with {}% of the selected content.",
                percent(count, total)
            ),
            Some(country.to_string().into()),
        ));
    }

    insights.push(type_ratio(movies, tv_shows, total));

    if let Some(trend) = recent_trend(&years, total) {
        insights.push(trend);
    }

    insights
}

fn type_ratio(movies: u64, tv_shows: u64, total: u64) -> Insight {
    let movie_ratio = percent(movies, total);
    // An exact tie reports TV Shows as dominant.
    let (dominant, share) = if movies > tv_shows {
        ("Movies", movie_ratio)
    } else {
        ("TV Shows", 100 - movie_ratio)
    };

    Insight::new(
        "type-ratio",
        InsightKind::Info,
        "Content Mix",
        format!("{dominant} dominate the selection at {share}% of total content."),
        Some(format!("{movie_ratio}% Movies").into()),
    )
}

fn recent_trend(years: &Tally<i32>, total: u64) -> Option<Insight> {
    let recent: Vec<u64> = years
        .iter()
        .filter(|(year, _)| **year >= RECENT_SINCE)
        .map(|(_, count)| count)
        .collect();

    if recent.len() < MIN_RECENT_YEARS {
        return None;
    }

    let pct = percent(recent.iter().sum(), total);
    let label = if pct > 50 {
        "significant modern growth"
    } else {
        "a mix of classic and modern titles"
    };

    Some(Insight::new(
        "recent-trend",
        InsightKind::Trend,
        "Recent Growth",
        format!("{pct}% of the selected content was released since {RECENT_SINCE}, showing {label}."),
        Some(pct.into()),
    ))
}

/// `part / whole` as a whole percentage, rounded half up.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0 + 0.5).floor() as u32
}

/// `8807` becomes `"8,807"`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
