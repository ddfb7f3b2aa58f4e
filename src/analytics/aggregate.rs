//! Pure reductions over an already-filtered set of titles.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::catalog::{merge_stats, round_year};
use crate::domain::{CountryMode, TitleKind};
use crate::models::{CatalogTitle, CountryStat, GenreStat, ScatterPoint, TimelinePoint};
use crate::parser::parse_duration;

/// Number of genres reported per country.
pub const TOP_GENRES_PER_COUNTRY: usize = 3;

const UNKNOWN_COUNTRY: &str = "Unknown";

/// Occurrence counter that remembers first-seen order.
///
/// Ties between equal counts resolve to whichever key was seen first, both
/// in [`Tally::top`] and in [`Tally::into_sorted`].
#[derive(Debug, Clone)]
pub struct Tally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: K, n: u64) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += n;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, n));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest count; the first-seen key wins a tie.
    #[must_use]
    pub fn top(&self) -> Option<(&K, u64)> {
        self.entries
            .iter()
            .fold(None, |best: Option<&(K, u64)>, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
            .map(|(key, count)| (key, *count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Entries by count descending, first-seen order within equal counts.
    #[must_use]
    pub fn into_sorted(mut self) -> Vec<(K, u64)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }
}

/// Titles per release year, ascending. Years without titles are absent.
#[must_use]
pub fn timeline(titles: &[CatalogTitle]) -> Vec<TimelinePoint> {
    let mut years: BTreeMap<i32, (u64, u64)> = BTreeMap::new();

    for title in titles {
        let entry = years.entry(title.release_year).or_default();
        match title.kind {
            TitleKind::Movie => entry.0 += 1,
            TitleKind::TvShow => entry.1 += 1,
        }
    }

    years
        .into_iter()
        .map(|(year, (movies, tv_shows))| TimelinePoint {
            year,
            movies,
            tv_shows,
            total: movies + tv_shows,
        })
        .collect()
}

/// Per-raw-genre counts, merged into canonical buckets.
#[must_use]
pub fn genre_stats(titles: &[CatalogTitle]) -> Vec<GenreStat> {
    #[derive(Default)]
    struct Acc {
        count: u64,
        movies: u64,
        shows: u64,
        year_sum: i64,
    }

    let mut order: Vec<String> = Vec::new();
    let mut acc: HashMap<&str, Acc> = HashMap::new();

    for title in titles {
        for genre in &title.genres {
            let e = acc.entry(genre.as_str()).or_insert_with(|| {
                order.push(genre.clone());
                Acc::default()
            });
            e.count += 1;
            e.year_sum += i64::from(title.release_year);
            match title.kind {
                TitleKind::Movie => e.movies += 1,
                TitleKind::TvShow => e.shows += 1,
            }
        }
    }

    let mut raw: Vec<GenreStat> = order
        .into_iter()
        .filter_map(|name| {
            let a = acc.get(name.as_str())?;
            #[allow(clippy::cast_precision_loss)]
            let avg_year = if a.count == 0 {
                0
            } else {
                round_year(a.year_sum as f64 / a.count as f64)
            };
            Some(GenreStat {
                name,
                count: a.count,
                avg_year,
                movie_count: a.movies,
                tv_show_count: a.shows,
            })
        })
        .filter(|s| s.count > 0)
        .collect();

    raw.sort_by(|a, b| b.count.cmp(&a.count));
    merge_stats(&raw)
}

/// Per-country counts under the given mode, with each country's top genres.
#[must_use]
pub fn country_stats(titles: &[CatalogTitle], mode: CountryMode) -> Vec<CountryStat> {
    struct Acc {
        iso: Option<String>,
        count: u64,
        movies: u64,
        shows: u64,
        genres: Tally<String>,
    }

    let primary_only = mode.is_primary();
    let mut order: Vec<String> = Vec::new();
    let mut acc: HashMap<String, Acc> = HashMap::new();

    for title in titles {
        for link in title.countries_for(primary_only) {
            let e = acc.entry(link.name.clone()).or_insert_with(|| {
                order.push(link.name.clone());
                Acc {
                    iso: link.iso.clone(),
                    count: 0,
                    movies: 0,
                    shows: 0,
                    genres: Tally::new(),
                }
            });
            e.count += 1;
            match title.kind {
                TitleKind::Movie => e.movies += 1,
                TitleKind::TvShow => e.shows += 1,
            }
            for genre in &title.genres {
                e.genres.add(genre.clone());
            }
        }
    }

    let mut stats: Vec<CountryStat> = order
        .into_iter()
        .filter_map(|country| {
            let a = acc.remove(&country)?;
            Some(CountryStat {
                country,
                iso: a.iso,
                count: a.count,
                movie_count: a.movies,
                tv_show_count: a.shows,
                top_genres: a
                    .genres
                    .into_sorted()
                    .into_iter()
                    .take(TOP_GENRES_PER_COUNTRY)
                    .map(|(name, _)| name)
                    .collect(),
            })
        })
        .filter(|s| s.count > 0)
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// One scatter point per title that has at least one genre.
#[must_use]
pub fn scatter(titles: &[CatalogTitle], mode: CountryMode) -> Vec<ScatterPoint> {
    let primary_only = mode.is_primary();

    titles
        .iter()
        .filter_map(|title| {
            let genre = title.first_genre()?;
            Some(ScatterPoint {
                id: title.id,
                title: title.name.clone(),
                kind: title.kind,
                release_year: title.release_year,
                genre: genre.to_string(),
                country: title
                    .first_country(primary_only)
                    .unwrap_or(UNKNOWN_COUNTRY)
                    .to_string(),
                duration: parse_duration(title.duration.as_deref(), title.kind),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, year: i32) -> CatalogTitle {
        CatalogTitle::builder(id, format!("s{id}"), TitleKind::Movie, format!("Movie {id}"), year)
            .build()
    }

    fn show(id: i32, year: i32) -> CatalogTitle {
        CatalogTitle::builder(id, format!("s{id}"), TitleKind::TvShow, format!("Show {id}"), year)
            .build()
    }

    #[test]
    fn tally_prefers_first_seen_on_ties() {
        let mut tally = Tally::new();
        for key in ["b", "a", "a", "b", "c"] {
            tally.add(key);
        }
        assert_eq!(tally.top(), Some((&"b", 2)));
        assert_eq!(tally.into_sorted(), vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn timeline_groups_by_year() {
        let titles = vec![
            movie(1, 2020),
            movie(2, 2020),
            movie(3, 2021),
            show(4, 2020),
            show(5, 2021),
            show(6, 2021),
        ];
        assert_eq!(
            timeline(&titles),
            vec![
                TimelinePoint { year: 2020, movies: 2, tv_shows: 1, total: 3 },
                TimelinePoint { year: 2021, movies: 1, tv_shows: 2, total: 3 },
            ]
        );
    }

    #[test]
    fn genre_stats_consolidate_and_average() {
        let mut a = movie(1, 2010);
        a.genres = vec!["Dramas".into(), "Comedies".into()];
        let mut b = show(2, 2020);
        b.genres = vec!["TV Dramas".into()];
        let mut c = movie(3, 2015);
        c.genres = vec!["Documentaries".into()];

        let stats = genre_stats(&[a, b, c]);
        assert_eq!(stats[0].name, "Drama");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].movie_count, 1);
        assert_eq!(stats[0].tv_show_count, 1);
        assert_eq!(stats[0].avg_year, 2015);
        assert!(stats.iter().all(|s| s.count > 0));
        assert!(stats.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn country_stats_respect_mode() {
        let title = CatalogTitle::builder(1, "s1", TitleKind::Movie, "Co-production", 2018)
            .countries(vec!["France".into(), "Belgium".into()])
            .genres(vec!["Dramas".into()])
            .build();
        let titles = vec![title];

        let all = country_stats(&titles, CountryMode::All);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].country, "Belgium");
        assert_eq!(all[1].iso.as_deref(), Some("BEL"));

        let primary = country_stats(&titles, CountryMode::Primary);
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].country, "France");
        assert_eq!(primary[0].top_genres, vec!["Dramas".to_string()]);
    }

    #[test]
    fn country_top_genres_capped_at_three() {
        let title = CatalogTitle::builder(1, "s1", TitleKind::TvShow, "Anthology", 2018)
            .countries(vec!["Japan".into()])
            .genres(vec![
                "Anime Series".into(),
                "TV Dramas".into(),
                "TV Horror".into(),
                "Reality TV".into(),
            ])
            .build();
        let stats = country_stats(&[title], CountryMode::All);
        assert_eq!(
            stats[0].top_genres,
            vec!["Anime Series", "TV Dramas", "TV Horror"]
        );
        assert_eq!(stats[0].tv_show_count, 1);
    }

    #[test]
    fn scatter_skips_titles_without_genres() {
        let with_genre = CatalogTitle::builder(1, "s1", TitleKind::Movie, "Long Film", 2001)
            .genres(vec!["Dramas".into(), "Comedies".into()])
            .duration("142 min")
            .build();
        let without = movie(2, 2002);

        let points = scatter(&[with_genre, without], CountryMode::All);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].genre, "Dramas");
        assert_eq!(points[0].country, "Unknown");
        assert_eq!(points[0].duration, Some(142));
    }
}
