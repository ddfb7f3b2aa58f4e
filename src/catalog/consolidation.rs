//! Collapses the catalog's granular genre labels into canonical buckets.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use crate::models::GenreStat;

/// `(raw label, canonical bucket)` pairs. Labels not listed are already canonical.
const GENRE_MAP: &[(&str, &str)] = &[
    ("Dramas", "Drama"),
    ("TV Dramas", "Drama"),
    ("Comedies", "Comedy"),
    ("TV Comedies", "Comedy"),
    ("Action & Adventure", "Action & Adventure"),
    ("TV Action & Adventure", "Action & Adventure"),
    ("Thrillers", "Thriller"),
    ("TV Thrillers", "Thriller"),
    ("Sci-Fi & Fantasy", "Sci-Fi & Fantasy"),
    ("TV Sci-Fi & Fantasy", "Sci-Fi & Fantasy"),
    ("Horror Movies", "Horror"),
    ("TV Horror", "Horror"),
    ("Documentaries", "Documentary"),
    ("Docuseries", "Documentary"),
    ("Science & Nature TV", "Documentary"),
    ("International Movies", "International"),
    ("International TV Shows", "International"),
    ("British TV Shows", "International"),
    ("Spanish-Language TV Shows", "International"),
    ("Korean TV Shows", "International"),
    ("Romantic Movies", "Romance"),
    ("Romantic TV Shows", "Romance"),
    ("Children & Family Movies", "Kids & Family"),
    ("Kids' TV", "Kids & Family"),
    ("Anime Features", "Anime"),
    ("Anime Series", "Anime"),
    ("Stand-Up Comedy", "Stand-Up & Talk"),
    ("Stand-Up Comedy & Talk Shows", "Stand-Up & Talk"),
    ("Crime TV Shows", "Crime"),
    ("TV Mysteries", "Crime"),
    ("Reality TV", "Reality"),
    ("Teen TV Shows", "Teen"),
    ("Classic Movies", "Classic & Cult"),
    ("Cult Movies", "Classic & Cult"),
    ("Classic & Cult TV", "Classic & Cult"),
    ("Independent Movies", "Independent"),
    ("Music & Musicals", "Music & Musicals"),
    ("Sports Movies", "Sports"),
    ("LGBTQ Movies", "LGBTQ"),
    ("Faith & Spirituality", "Faith & Spirituality"),
];

fn lookup() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| GENRE_MAP.iter().copied().collect())
}

/// Canonical bucket for a raw genre label, or the label itself when unmapped.
#[must_use]
pub fn consolidate(raw: &str) -> &str {
    lookup().get(raw).copied().unwrap_or(raw)
}

/// Every raw label that consolidates into `canonical`.
///
/// A name nothing maps to is its own sole constituent.
#[must_use]
pub fn original_names_for(canonical: &str) -> BTreeSet<String> {
    let names: BTreeSet<String> = GENRE_MAP
        .iter()
        .filter(|(_, bucket)| *bucket == canonical)
        .map(|(raw, _)| (*raw).to_string())
        .collect();

    if names.is_empty() {
        BTreeSet::from([canonical.to_string()])
    } else {
        names
    }
}

/// Merges per-raw-genre rows into canonical buckets.
///
/// Counts are summed; `avg_year` is folded in as a count-weighted running
/// average. The result is sorted by count, descending, with buckets that tie
/// kept in first-seen order.
#[must_use]
pub fn merge_stats(rows: &[GenreStat]) -> Vec<GenreStat> {
    let mut merged: Vec<GenreStat> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let canonical = consolidate(&row.name);

        let Some(&slot) = index.get(canonical) else {
            index.insert(canonical.to_string(), merged.len());
            merged.push(GenreStat {
                name: canonical.to_string(),
                ..row.clone()
            });
            continue;
        };

        let existing = &mut merged[slot];
        let before = existing.count;
        existing.count += row.count;
        existing.movie_count += row.movie_count;
        existing.tv_show_count += row.tv_show_count;

        if existing.count > 0 {
            #[allow(clippy::cast_precision_loss)]
            let weighted = (f64::from(existing.avg_year) * before as f64
                + f64::from(row.avg_year) * row.count as f64)
                / existing.count as f64;
            existing.avg_year = round_year(weighted);
        }
    }

    merged.sort_by(|a, b| b.count.cmp(&a.count));
    merged
}

/// Rounds half up, so `2015.5` becomes `2016`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_year(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str, count: u64, avg_year: i32, movies: u64, shows: u64) -> GenreStat {
        GenreStat {
            name: name.to_string(),
            count,
            avg_year,
            movie_count: movies,
            tv_show_count: shows,
        }
    }

    #[test]
    fn known_labels_collapse() {
        assert_eq!(consolidate("TV Dramas"), "Drama");
        assert_eq!(consolidate("Korean TV Shows"), "International");
        assert_eq!(consolidate("Kids' TV"), "Kids & Family");
    }

    #[test]
    fn unknown_labels_are_identity() {
        assert_eq!(consolidate("Drama"), "Drama");
        assert_eq!(consolidate("Mockumentary"), "Mockumentary");
    }

    #[test]
    fn inverse_contains_every_raw_label() {
        for (raw, _) in GENRE_MAP {
            assert!(original_names_for(consolidate(raw)).contains(*raw));
        }
        assert_eq!(
            original_names_for("Mockumentary"),
            BTreeSet::from(["Mockumentary".to_string()])
        );
    }

    #[test]
    fn no_raw_label_maps_twice() {
        let mut seen = HashMap::new();
        for (raw, canonical) in GENRE_MAP {
            if let Some(previous) = seen.insert(*raw, *canonical) {
                assert_eq!(previous, *canonical, "{raw} mapped twice");
            }
        }
    }

    #[test]
    fn merge_weights_average_year() {
        let merged = merge_stats(&[
            stat("Dramas", 500, 2015, 300, 200),
            stat("TV Dramas", 100, 2018, 0, 100),
        ]);
        // (2015 * 500 + 2018 * 100) / 600 = 2015.5, rounded half up
        assert_eq!(merged, vec![stat("Drama", 600, 2016, 300, 300)]);
    }

    #[test]
    fn merge_is_order_independent() {
        let a = stat("Comedies", 40, 2010, 40, 0);
        let b = stat("TV Comedies", 20, 2019, 0, 20);
        let c = stat("Dramas", 10, 2000, 10, 0);

        let first = merge_stats(&[a.clone(), b.clone(), c.clone()]);
        let second = merge_stats(&[c, a, b]);
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Comedy");
        assert_eq!(first[0].count, 60);
        assert_eq!(first[0].avg_year, 2013);
    }

    #[test]
    fn zero_count_rows_do_not_divide_by_zero() {
        let merged = merge_stats(&[stat("Dramas", 0, 0, 0, 0), stat("TV Dramas", 0, 0, 0, 0)]);
        assert_eq!(merged, vec![stat("Drama", 0, 0, 0, 0)]);
    }

    #[test]
    fn output_sorted_by_count() {
        let merged = merge_stats(&[
            stat("Horror Movies", 5, 2010, 5, 0),
            stat("Documentaries", 9, 2012, 9, 0),
            stat("Thrillers", 7, 2014, 7, 0),
        ]);
        let counts: Vec<u64> = merged.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![9, 7, 5]);
    }
}
