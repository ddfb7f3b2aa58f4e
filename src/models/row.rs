use chrono::NaiveDate;

use super::{CatalogTitle, CountryLink};
use crate::domain::{TitleId, TitleKind};

/// One title as read from the source CSV, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub show_id: String,
    pub kind: TitleKind,
    pub name: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    /// Country names in listing order, deduplicated.
    pub countries: Vec<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    /// Raw genre labels in listing order, deduplicated.
    pub genres: Vec<String>,
    pub description: Option<String>,
}

impl CatalogRow {
    #[must_use]
    pub fn into_title(self, id: TitleId) -> CatalogTitle {
        CatalogTitle {
            id,
            show_id: self.show_id,
            kind: self.kind,
            name: self.name,
            director: self.director,
            cast: self.cast,
            date_added: self.date_added,
            release_year: self.release_year,
            rating: self.rating,
            duration: self.duration,
            description: self.description,
            genres: self.genres,
            countries: CountryLink::from_listing(self.countries),
        }
    }
}
