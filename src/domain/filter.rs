//! Filter contract shared by every aggregation.
//!
//! [`FilterSpec`] is what callers hand in (query parameters, CLI flags).
//! [`TitleQuery`] is the immutable predicate derived from it by a pure
//! function; the in-memory catalog evaluates it with [`TitleQuery::matches`]
//! and the SQL repository translates the same value into a `Condition`.

use std::collections::BTreeSet;

use super::{CountryMode, TitleKind, YearRange};
use crate::catalog::consolidation;
use crate::models::CatalogTitle;

/// Caller-facing filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Canonical or raw genre names. Empty means unrestricted.
    pub genres: Vec<String>,
    /// Country names. Empty means unrestricted.
    pub countries: Vec<String>,
    /// Empty means both kinds.
    pub types: Vec<TitleKind>,
    pub years: YearRange,
    pub country_mode: CountryMode,
}

impl FilterSpec {
    /// Same filter with the genre restriction removed.
    #[must_use]
    pub fn without_genres(&self) -> Self {
        Self {
            genres: Vec::new(),
            ..self.clone()
        }
    }

    /// Same filter with the country restriction removed.
    #[must_use]
    pub fn without_countries(&self) -> Self {
        Self {
            countries: Vec::new(),
            ..self.clone()
        }
    }

    /// Builds the store predicate.
    ///
    /// Each requested genre is expanded to itself plus every raw label that
    /// consolidates into it, so both "Drama" and "Dramas" select titles tagged
    /// "Dramas" or "TV Dramas".
    #[must_use]
    pub fn to_query(&self) -> TitleQuery {
        let genres = self
            .genres
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .flat_map(|g| {
                let mut names = consolidation::original_names_for(g);
                names.insert(g.to_string());
                names
            })
            .collect();

        let names: BTreeSet<String> = self
            .countries
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let countries = (!names.is_empty()).then(|| CountryMatch {
            names,
            primary_only: self.country_mode.is_primary(),
        });

        TitleQuery {
            years: self.years,
            kinds: self.types.iter().copied().collect(),
            genres,
            countries,
            name_contains: None,
        }
    }
}

/// Country restriction of a [`TitleQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryMatch {
    pub names: BTreeSet<String>,
    /// Only associations flagged primary are considered.
    pub primary_only: bool,
}

/// Immutable title predicate.
///
/// All present restrictions must hold. Empty sets mean "no restriction".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    pub years: YearRange,
    pub kinds: BTreeSet<TitleKind>,
    /// Raw genre labels, already expanded.
    pub genres: BTreeSet<String>,
    pub countries: Option<CountryMatch>,
    /// Case-insensitive substring of the title name.
    pub name_contains: Option<String>,
}

impl Default for TitleQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl TitleQuery {
    /// Predicate matching every title.
    #[must_use]
    pub fn all() -> Self {
        Self {
            years: YearRange::default(),
            kinds: BTreeSet::new(),
            genres: BTreeSet::new(),
            countries: None,
            name_contains: None,
        }
    }

    /// Predicate used by search: name contains `needle`, nothing else.
    #[must_use]
    pub fn name_search(needle: impl Into<String>) -> Self {
        Self {
            name_contains: Some(needle.into()),
            ..Self::all()
        }
    }

    #[must_use]
    pub fn matches(&self, title: &CatalogTitle) -> bool {
        if !self.years.contains(title.release_year) {
            return false;
        }

        if !self.kinds.is_empty() && !self.kinds.contains(&title.kind) {
            return false;
        }

        if !self.genres.is_empty() && !title.genres.iter().any(|g| self.genres.contains(g)) {
            return false;
        }

        if let Some(countries) = &self.countries {
            let hit = title
                .countries
                .iter()
                .filter(|link| !countries.primary_only || link.is_primary)
                .any(|link| countries.names.contains(&link.name));
            if !hit {
                return false;
            }
        }

        if let Some(needle) = &self.name_contains {
            let needle = needle.to_lowercase();
            if !title.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryLink;

    fn title(kind: TitleKind, year: i32, genres: &[&str], countries: &[&str]) -> CatalogTitle {
        CatalogTitle::builder(1, "s1", kind, "The Example", year)
            .genres(genres.iter().map(|g| (*g).to_string()).collect())
            .countries(countries.iter().copied().map(String::from).collect())
            .build()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let query = FilterSpec::default().to_query();
        assert!(query.matches(&title(TitleKind::Movie, 1950, &[], &[])));
        assert!(query.matches(&title(TitleKind::TvShow, 2024, &["Dramas"], &["India"])));
    }

    #[test]
    fn canonical_genre_expands_to_raw_labels() {
        let spec = FilterSpec {
            genres: vec!["Drama".into()],
            ..FilterSpec::default()
        };
        let query = spec.to_query();
        assert!(query.genres.contains("Dramas"));
        assert!(query.genres.contains("TV Dramas"));
        assert!(query.genres.contains("Drama"));
        assert!(query.matches(&title(TitleKind::TvShow, 2020, &["TV Dramas"], &[])));
        assert!(!query.matches(&title(TitleKind::TvShow, 2020, &["Comedies"], &[])));
    }

    #[test]
    fn primary_mode_ignores_secondary_countries() {
        let t = title(TitleKind::Movie, 2019, &[], &["France", "Canada"]);

        let mut spec = FilterSpec {
            countries: vec!["Canada".into()],
            ..FilterSpec::default()
        };
        assert!(spec.to_query().matches(&t));

        spec.country_mode = CountryMode::Primary;
        assert!(!spec.to_query().matches(&t));

        spec.countries = vec!["France".into()];
        assert!(spec.to_query().matches(&t));
    }

    #[test]
    fn year_and_type_restrictions() {
        let spec = FilterSpec {
            types: vec![TitleKind::TvShow],
            years: YearRange::new(2010, 2015),
            ..FilterSpec::default()
        };
        let query = spec.to_query();
        assert!(query.matches(&title(TitleKind::TvShow, 2012, &[], &[])));
        assert!(!query.matches(&title(TitleKind::Movie, 2012, &[], &[])));
        assert!(!query.matches(&title(TitleKind::TvShow, 2016, &[], &[])));
    }

    #[test]
    fn name_search_is_case_insensitive() {
        let query = TitleQuery::name_search("EXAM");
        assert!(query.matches(&title(TitleKind::Movie, 2000, &[], &[])));
        assert!(!TitleQuery::name_search("zzz").matches(&title(TitleKind::Movie, 2000, &[], &[])));
    }

    #[test]
    fn without_dimension_drops_only_that_restriction() {
        let spec = FilterSpec {
            genres: vec!["Drama".into()],
            countries: vec!["India".into()],
            ..FilterSpec::default()
        };
        assert!(spec.without_genres().genres.is_empty());
        assert_eq!(spec.without_genres().countries, vec!["India".to_string()]);
        assert!(spec.without_countries().countries.is_empty());
        assert_eq!(spec.without_countries().genres, vec!["Drama".to_string()]);
    }

    #[test]
    fn country_links_carry_primary_flag() {
        let t = title(TitleKind::Movie, 2000, &[], &["Japan", "China"]);
        assert_eq!(
            t.countries,
            vec![
                CountryLink::new("Japan", Some("JPN".into()), true),
                CountryLink::new("China", Some("CHN".into()), false),
            ]
        );
    }
}
