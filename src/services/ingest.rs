//! Loads the catalog CSV into [`CatalogRow`]s and seeds the store.
//!
//! Expected header (order free, extra columns ignored):
//! `show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::db::{SeedCounts, Store};
use crate::domain::TitleKind;
use crate::models::CatalogRow;
use crate::parser::{CsvError, CsvReader, CsvRecord};
use crate::services::catalog_store::StoreError;

/// Columns a row cannot be interpreted without.
const REQUIRED_COLUMNS: [&str; 4] = ["show_id", "type", "title", "release_year"];

/// `September 25, 2021`
const SOURCE_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CsvError> for IngestError {
    fn from(err: CsvError) -> Self {
        let line = match &err {
            CsvError::UnterminatedQuote { line } | CsvError::TrailingAfterQuote { line, .. } => {
                *line
            }
        };
        Self::Csv {
            line,
            message: err.to_string(),
        }
    }
}

/// Parsed rows plus what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub rows: Vec<CatalogRow>,
    /// Rows rejected for an unknown type or a repeated `show_id`.
    pub skipped: usize,
}

struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_header(header: &CsvRecord) -> Result<Self, IngestError> {
        let index: HashMap<String, usize> = header
            .fields
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_ascii_lowercase(), i))
            .collect();

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !index.contains_key(**c)) {
            return Err(IngestError::MissingColumn((*missing).to_string()));
        }

        Ok(Self { index })
    }

    fn get<'r>(&self, record: &'r CsvRecord, column: &str) -> &'r str {
        self.index
            .get(column)
            .and_then(|&i| record.get(i))
            .map_or("", str::trim)
    }

    fn optional(&self, record: &CsvRecord, column: &str) -> Option<String> {
        let value = self.get(record, column);
        (!value.is_empty()).then(|| value.to_string())
    }
}

pub struct CsvCatalogLoader;

impl CsvCatalogLoader {
    pub async fn load_path(path: &Path) -> Result<LoadedCatalog, IngestError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IngestError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let loaded = Self::parse_str(&content)?;
        info!(
            path = %path.display(),
            rows = loaded.rows.len(),
            skipped = loaded.skipped,
            "Catalog CSV loaded"
        );
        Ok(loaded)
    }

    pub fn parse_str(content: &str) -> Result<LoadedCatalog, IngestError> {
        let mut records = CsvReader::new(content);

        let Some(header) = records.next().transpose()? else {
            return Ok(LoadedCatalog::default());
        };
        let columns = Columns::from_header(&header)?;

        let mut loaded = LoadedCatalog::default();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for record in records {
            let record = record?;

            let show_id = columns.get(&record, "show_id");
            let raw_type = columns.get(&record, "type");

            let Some(kind) = TitleKind::parse(raw_type) else {
                warn!(line = record.line, show_id, raw_type, "Skipping row with unknown type");
                loaded.skipped += 1;
                continue;
            };

            if !seen_ids.insert(show_id.to_string()) {
                warn!(line = record.line, show_id, "Skipping duplicate show_id");
                loaded.skipped += 1;
                continue;
            }

            loaded.rows.push(CatalogRow {
                show_id: show_id.to_string(),
                kind,
                name: columns.get(&record, "title").to_string(),
                director: columns.optional(&record, "director"),
                cast: columns.optional(&record, "cast"),
                countries: split_listing(columns.get(&record, "country")),
                date_added: parse_date_added(columns.get(&record, "date_added")),
                release_year: columns.get(&record, "release_year").parse().unwrap_or(0),
                rating: columns.optional(&record, "rating"),
                duration: columns.optional(&record, "duration"),
                genres: split_listing(columns.get(&record, "listed_in")),
                description: columns.optional(&record, "description"),
            });
        }

        debug!(rows = loaded.rows.len(), skipped = loaded.skipped, "Parsed catalog rows");
        Ok(loaded)
    }
}

/// Reads `path` and replaces the store's catalog with it.
pub async fn seed_store(store: &Store, path: &Path) -> Result<SeedCounts, IngestError> {
    let loaded = CsvCatalogLoader::load_path(path).await?;
    let counts = store
        .replace_catalog(&loaded.rows)
        .await
        .map_err(StoreError::from)?;
    Ok(counts)
}

/// Comma-separated listing to trimmed, non-empty, first-occurrence-only names.
#[must_use]
pub fn split_listing(value: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

#[must_use]
pub fn parse_date_added(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, SOURCE_DATE_FORMAT).ok()
}
