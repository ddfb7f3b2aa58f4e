use flixlens::config::Config;
use flixlens::db::Store;
use flixlens::domain::{FilterSpec, TitleKind, TitleQuery};
use flixlens::services::{CatalogStore, CsvCatalogLoader, MemoryCatalog, TitlePage};
use flixlens::state::SharedState;

const CATALOG_CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Night 100%,,,\"Japan, South Korea\",\"March 3, 2019\",2019,TV-14,98 min,\"Horror Movies, International Movies\",
s2,TV Show,The_Office Hours,,,United Kingdom,,2019,TV-PG,3 Seasons,\"British TV Shows, TV Comedies\",
s3,Movie,Quiet Days,,,Japan,,2016,,110 min,Dramas,
s4,TV Show,Night Shift,,,,,2022,,1 Season,TV Horror,
";

fn temp_database_url() -> String {
    let path = std::env::temp_dir().join(format!("flixlens-store-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}?mode=rwc", path.display())
}

async fn seeded() -> (Store, MemoryCatalog) {
    let store = Store::new(&temp_database_url()).await.unwrap();
    let loaded = CsvCatalogLoader::parse_str(CATALOG_CSV).unwrap();
    store.replace_catalog(&loaded.rows).await.unwrap();
    (store, MemoryCatalog::from_rows(loaded.rows))
}

#[tokio::test]
async fn test_replace_catalog_counts_and_reseed() {
    let store = Store::new(&temp_database_url()).await.unwrap();
    assert!(store.is_catalog_empty().await.unwrap());

    let loaded = CsvCatalogLoader::parse_str(CATALOG_CSV).unwrap();
    let counts = store.replace_catalog(&loaded.rows).await.unwrap();
    assert_eq!(counts.titles, 4);
    assert_eq!(counts.genres, 6);
    assert_eq!(counts.countries, 3);

    let again = store.replace_catalog(&loaded.rows[..2]).await.unwrap();
    assert_eq!(again.titles, 2);
    assert_eq!(store.count_titles(&TitleQuery::all()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_store_matches_memory_catalog() {
    let (store, memory) = seeded().await;

    let queries = [
        TitleQuery::all(),
        FilterSpec {
            genres: vec!["Horror".into()],
            ..FilterSpec::default()
        }
        .to_query(),
        FilterSpec {
            countries: vec!["South Korea".into()],
            ..FilterSpec::default()
        }
        .to_query(),
        FilterSpec {
            countries: vec!["South Korea".into()],
            country_mode: flixlens::domain::CountryMode::Primary,
            ..FilterSpec::default()
        }
        .to_query(),
        FilterSpec {
            types: vec![TitleKind::TvShow],
            ..FilterSpec::default()
        }
        .to_query(),
        TitleQuery::name_search("night"),
    ];

    for query in &queries {
        for page in [
            TitlePage::all(),
            TitlePage::first(2),
            TitlePage::newest_first(2, 1),
        ] {
            let from_db = store.fetch_titles(query, &page).await.unwrap();
            let from_memory = memory.fetch_titles(query, &page).await.unwrap();
            assert_eq!(from_db, from_memory, "query {query:?} page {page:?}");
        }
        assert_eq!(
            store.count_titles(query).await.unwrap(),
            memory.count_titles(query).await.unwrap()
        );
    }

    assert_eq!(
        store.genre_usage().await.unwrap(),
        memory.genre_usage().await.unwrap()
    );
    assert_eq!(
        store.country_usage().await.unwrap(),
        memory.country_usage().await.unwrap()
    );
    assert_eq!(
        store.release_year_bounds().await.unwrap(),
        Some((2016, 2022))
    );
}

#[tokio::test]
async fn test_name_search_escapes_like_wildcards() {
    let (store, _) = seeded().await;

    let percent = store
        .fetch_titles(&TitleQuery::name_search("100%"), &TitlePage::all())
        .await
        .unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].show_id, "s1");

    let underscore = store
        .count_titles(&TitleQuery::name_search("e_o"))
        .await
        .unwrap();
    assert_eq!(underscore, 1);

    let literal_wildcard = store
        .count_titles(&TitleQuery::name_search("%"))
        .await
        .unwrap();
    assert_eq!(literal_wildcard, 1);
}

#[tokio::test]
async fn test_associations_keep_source_order() {
    let (store, _) = seeded().await;

    let titles = store
        .fetch_titles(&TitleQuery::all(), &TitlePage::first(1))
        .await
        .unwrap();
    let first = &titles[0];

    assert_eq!(first.genres, vec!["Horror Movies", "International Movies"]);
    assert_eq!(first.countries[0].name, "Japan");
    assert!(first.countries[0].is_primary);
    assert_eq!(first.countries[0].iso.as_deref(), Some("JPN"));
    assert_eq!(first.countries[1].name, "South Korea");
    assert!(!first.countries[1].is_primary);
    assert_eq!(
        first.date_added,
        chrono::NaiveDate::from_ymd_opt(2019, 3, 3)
    );
}

#[tokio::test]
async fn test_seed_if_empty_reads_configured_csv() {
    let csv_path =
        std::env::temp_dir().join(format!("flixlens-seed-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(&csv_path, CATALOG_CSV).unwrap();

    let mut config = Config::default();
    config.general.database_path = temp_database_url();
    config.catalog.csv_path = csv_path.display().to_string();

    let shared = SharedState::new(config).await.unwrap();
    shared.seed_if_empty().await.unwrap();
    assert_eq!(shared.store.count_titles(&TitleQuery::all()).await.unwrap(), 4);

    // a second call leaves the populated catalog alone
    std::fs::write(&csv_path, "show_id,type,title,release_year\n").unwrap();
    shared.seed_if_empty().await.unwrap();
    assert_eq!(shared.store.count_titles(&TitleQuery::all()).await.unwrap(), 4);

    std::fs::remove_file(&csv_path).ok();
}

#[tokio::test]
async fn test_missing_seed_csv_is_not_fatal() {
    let mut config = Config::default();
    config.general.database_path = temp_database_url();
    config.catalog.csv_path = "/nonexistent/flixlens.csv".to_string();

    let shared = SharedState::new(config).await.unwrap();
    shared.seed_if_empty().await.unwrap();
    assert!(shared.store.is_catalog_empty().await.unwrap());
}

#[tokio::test]
async fn test_name_search_folds_non_ascii_like_memory() {
    let csv = "\
show_id,type,title,release_year
s1,TV Show,Élite,2018
s2,Movie,ÁNGEL NEGRO,2000
s3,Movie,Elite Squad,2007
";
    let store = Store::new(&temp_database_url()).await.unwrap();
    let loaded = CsvCatalogLoader::parse_str(csv).unwrap();
    store.replace_catalog(&loaded.rows).await.unwrap();
    let memory = MemoryCatalog::from_rows(loaded.rows);

    for (needle, expected) in [
        ("Élite", 1),
        ("élite", 1),
        ("ÉLITE", 1),
        ("lite", 2),
        ("ángel", 1),
        ("Ángel Negro", 1),
    ] {
        let query = TitleQuery::name_search(needle);
        assert_eq!(store.count_titles(&query).await.unwrap(), expected, "{needle}");
        assert_eq!(memory.count_titles(&query).await.unwrap(), expected, "{needle}");
    }
}
