use std::sync::Arc;

use flixlens::domain::{CountryMode, FilterSpec, TitleKind, YearRange};
use flixlens::models::{CatalogTitle, TimelinePoint};
use flixlens::services::{AnalyticsService, CatalogAnalyticsService, MemoryCatalog, ResultLimits};

fn title(id: i32, kind: TitleKind, year: i32, genres: &[&str], countries: &[&str]) -> CatalogTitle {
    CatalogTitle::builder(id, format!("s{id}"), kind, format!("Title {id}"), year)
        .genres(genres.iter().map(|g| (*g).to_string()).collect())
        .countries(countries.iter().map(|c| (*c).to_string()).collect())
        .build()
}

fn service(titles: Vec<CatalogTitle>) -> CatalogAnalyticsService {
    CatalogAnalyticsService::new(Arc::new(MemoryCatalog::new(titles)), ResultLimits::default())
}

fn six_titles() -> Vec<CatalogTitle> {
    vec![
        title(1, TitleKind::Movie, 2020, &["Dramas"], &["India", "United States"]),
        title(2, TitleKind::Movie, 2020, &["Comedies"], &["United States"]),
        title(3, TitleKind::Movie, 2021, &["Dramas"], &["France"]),
        title(4, TitleKind::TvShow, 2020, &["TV Dramas"], &["United States", "India"]),
        title(5, TitleKind::TvShow, 2021, &["Crime TV Shows"], &["India"]),
        title(6, TitleKind::TvShow, 2021, &["TV Comedies"], &[]),
    ]
}

#[tokio::test]
async fn test_timeline_scenario() {
    let points = service(six_titles())
        .timeline(&FilterSpec::default())
        .await
        .unwrap();

    assert_eq!(
        points,
        vec![
            TimelinePoint {
                year: 2020,
                movies: 2,
                tv_shows: 1,
                total: 3
            },
            TimelinePoint {
                year: 2021,
                movies: 1,
                tv_shows: 2,
                total: 3
            },
        ]
    );
}

#[tokio::test]
async fn test_timeline_properties_hold_under_filters() {
    let svc = service(six_titles());
    let specs = [
        FilterSpec::default(),
        FilterSpec {
            types: vec![TitleKind::TvShow],
            ..FilterSpec::default()
        },
        FilterSpec {
            countries: vec!["India".into()],
            country_mode: CountryMode::Primary,
            ..FilterSpec::default()
        },
        FilterSpec {
            years: YearRange::new(2021, 2021),
            ..FilterSpec::default()
        },
    ];

    for spec in &specs {
        let points = svc.timeline(spec).await.unwrap();
        assert!(points.windows(2).all(|w| w[0].year < w[1].year));
        assert!(points.iter().all(|p| p.movies + p.tv_shows == p.total));
    }
}

#[tokio::test]
async fn test_genres_merge_and_sort() {
    let genres = service(six_titles())
        .genres(&FilterSpec {
            genres: vec!["Crime".into()],
            ..FilterSpec::default()
        })
        .await
        .unwrap();

    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Drama", "Comedy", "Crime"]);
    assert_eq!(genres[0].count, 3);
    assert_eq!(genres[0].movie_count, 2);
    assert_eq!(genres[0].tv_show_count, 1);
    assert!(genres.windows(2).all(|w| w[0].count >= w[1].count));
}

#[tokio::test]
async fn test_primary_mode_excludes_secondary_countries() {
    let svc = service(six_titles());

    let all = svc.countries(&FilterSpec::default()).await.unwrap();
    let primary = svc
        .countries(&FilterSpec {
            country_mode: CountryMode::Primary,
            ..FilterSpec::default()
        })
        .await
        .unwrap();

    let count_of = |stats: &[flixlens::models::CountryStat], name: &str| {
        stats
            .iter()
            .find(|s| s.country == name)
            .map_or(0, |s| s.count)
    };

    assert_eq!(count_of(&all, "India"), 3);
    assert_eq!(count_of(&primary, "India"), 2);
    assert_eq!(count_of(&all, "United States"), 3);
    assert_eq!(count_of(&primary, "United States"), 2);
}

#[tokio::test]
async fn test_country_filter_restricts_other_views() {
    let svc = service(six_titles());
    let spec = FilterSpec {
        countries: vec!["United States".into()],
        country_mode: CountryMode::Primary,
        ..FilterSpec::default()
    };

    let titles = svc.titles(&spec, None, 0).await.unwrap();
    let ids: Vec<&str> = titles.titles.iter().map(|t| t.show_id.as_str()).collect();
    assert_eq!(titles.total, 2);
    assert_eq!(ids, vec!["s2", "s4"]);
}

#[tokio::test]
async fn test_search_orders_newest_first() {
    let svc = service(six_titles());

    assert!(svc.search("", None).await.unwrap().results.is_empty());
    assert!(svc.search("t", None).await.unwrap().results.is_empty());

    let found = svc.search("title", Some(3)).await.unwrap();
    let years: Vec<i32> = found.results.iter().map(|t| t.release_year).collect();
    assert_eq!(years, vec![2021, 2021, 2021]);

    let found = svc.search("TITLE 1", None).await.unwrap();
    assert_eq!(found.results.len(), 1);
}

#[tokio::test]
async fn test_insights_pipeline() {
    let svc = service(six_titles());

    let insights = svc.insights(&FilterSpec::default()).await.unwrap();
    let ids: Vec<&str> = insights.iter().map(|i| i.id.as_str()).collect();
    // two recent years only, so no recent-trend
    assert_eq!(
        ids,
        vec!["total-count", "top-genre", "peak-year", "top-country", "type-ratio"]
    );
    assert_eq!(
        insights[4].text,
        "TV Shows dominate the selection at 50% of total content."
    );
    assert_eq!(
        insights[1].text,
        "Dramas is the most common genre, appearing in 33% of the selected titles."
    );

    let empty = svc
        .insights(&FilterSpec {
            years: YearRange::new(1900, 1901),
            ..FilterSpec::default()
        })
        .await
        .unwrap();
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].id, "no-data");
}

#[tokio::test]
async fn test_summary_over_memory_catalog() {
    let summary = service(six_titles()).summary().await.unwrap();
    assert_eq!(summary.total_titles, 6);
    assert_eq!(summary.total_movies, 3);
    assert_eq!(summary.total_tv_shows, 3);
    assert_eq!(summary.total_genres, 5);
    assert_eq!(summary.total_countries, 3);
    assert_eq!(summary.year_range, [2020, 2021]);
    assert_eq!(summary.top_genre, "Dramas");
    assert_eq!(summary.top_country, "India");
}
