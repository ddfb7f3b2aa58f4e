//! Domain primitives for the title catalog.
//!
//! Newtypes and small enums shared by the store, the analytics layer and the
//! HTTP surface. Everything here is plain data with no I/O.

pub mod filter;

pub use filter::{CountryMatch, FilterSpec, TitleQuery};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a title in the catalog.
///
/// # Examples
///
/// ```rust
/// use flixlens::domain::TitleId;
///
/// let id = TitleId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TitleId(i32);

impl TitleId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "TitleId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TitleId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl From<TitleId> for i32 {
    fn from(id: TitleId) -> Self {
        id.0
    }
}

impl Serialize for TitleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for TitleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Content type of a title.
///
/// Serialized with the catalog's own labels (`"Movie"`, `"TV Show"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TitleKind {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl TitleKind {
    pub const ALL: [Self; 2] = [Self::Movie, Self::TvShow];

    /// Label stored in the database and emitted over the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::TvShow => "TV Show",
        }
    }

    /// Lenient parse used for query parameters and CSV rows.
    ///
    /// Accepts `Movie`, `TV Show` and `TVShow` in any case; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "movie" => Some(Self::Movie),
            "tvshow" => Some(Self::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which country associations count when filtering or aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryMode {
    /// Every associated country counts.
    #[default]
    All,
    /// Only the first-listed (primary) country counts.
    Primary,
}

impl CountryMode {
    /// Unknown values degrade to [`CountryMode::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("primary") {
            Self::Primary
        } else {
            Self::All
        }
    }

    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Inclusive release-year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const UNBOUNDED_MIN: i32 = 0;
    pub const UNBOUNDED_MAX: i32 = 9999;

    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(Self::UNBOUNDED_MIN, Self::UNBOUNDED_MAX)
    }
}
