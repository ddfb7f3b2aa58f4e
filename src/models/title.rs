use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::iso_code_for;
use crate::domain::{TitleId, TitleKind};

/// A title together with its ordered genre and country associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTitle {
    pub id: TitleId,
    pub show_id: String,
    pub kind: TitleKind,
    pub name: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    /// Raw genre labels in listing order.
    pub genres: Vec<String>,
    /// Country links in listing order; the first one is primary.
    pub countries: Vec<CountryLink>,
}

impl CatalogTitle {
    #[must_use]
    pub fn builder(
        id: i32,
        show_id: impl Into<String>,
        kind: TitleKind,
        name: impl Into<String>,
        release_year: i32,
    ) -> CatalogTitleBuilder {
        CatalogTitleBuilder {
            title: Self {
                id: TitleId::new(id),
                show_id: show_id.into(),
                kind,
                name: name.into(),
                director: None,
                cast: None,
                date_added: None,
                release_year,
                rating: None,
                duration: None,
                description: None,
                genres: Vec::new(),
                countries: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn first_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }

    /// First country visible under the given mode.
    #[must_use]
    pub fn first_country(&self, primary_only: bool) -> Option<&str> {
        self.countries
            .iter()
            .find(|link| !primary_only || link.is_primary)
            .map(|link| link.name.as_str())
    }

    /// Country links counted under the given mode.
    pub fn countries_for(&self, primary_only: bool) -> impl Iterator<Item = &CountryLink> {
        self.countries
            .iter()
            .filter(move |link| !primary_only || link.is_primary)
    }
}

/// Association between a title and a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryLink {
    pub name: String,
    pub iso: Option<String>,
    pub is_primary: bool,
}

impl CountryLink {
    pub fn new(name: impl Into<String>, iso: Option<String>, is_primary: bool) -> Self {
        Self {
            name: name.into(),
            iso,
            is_primary,
        }
    }

    /// Links for a listing; the first entry becomes primary.
    #[must_use]
    pub fn from_listing(names: Vec<String>) -> Vec<Self> {
        names
            .into_iter()
            .enumerate()
            .map(|(position, name)| {
                let iso = iso_code_for(&name).map(str::to_string);
                Self::new(name, iso, position == 0)
            })
            .collect()
    }
}

pub struct CatalogTitleBuilder {
    title: CatalogTitle,
}

impl CatalogTitleBuilder {
    #[must_use]
    pub fn genres(mut self, genres: Vec<String>) -> Self {
        self.title.genres = genres;
        self
    }

    #[must_use]
    pub fn countries(mut self, countries: Vec<String>) -> Self {
        self.title.countries = CountryLink::from_listing(countries);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.title.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn director(mut self, director: impl Into<String>) -> Self {
        self.title.director = Some(director.into());
        self
    }

    #[must_use]
    pub const fn date_added(mut self, date: NaiveDate) -> Self {
        self.title.date_added = Some(date);
        self
    }

    #[must_use]
    pub fn build(self) -> CatalogTitle {
        self.title
    }
}

/// Flattened title as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TitleDto {
    pub id: TitleId,
    pub show_id: String,
    #[serde(rename = "type")]
    pub kind: TitleKind,
    pub title: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub countries: Vec<String>,
    pub genres: Vec<String>,
}

impl From<CatalogTitle> for TitleDto {
    fn from(title: CatalogTitle) -> Self {
        Self {
            id: title.id,
            show_id: title.show_id,
            kind: title.kind,
            title: title.name,
            director: title.director,
            cast: title.cast,
            date_added: title.date_added,
            release_year: title.release_year,
            rating: title.rating,
            duration: title.duration,
            description: title.description,
            countries: title.countries.into_iter().map(|c| c.name).collect(),
            genres: title.genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_country_respects_mode() {
        let title = CatalogTitle::builder(1, "s1", TitleKind::Movie, "A", 2020)
            .countries(vec!["Spain".into(), "Mexico".into()])
            .build();
        assert_eq!(title.first_country(false), Some("Spain"));
        assert_eq!(title.first_country(true), Some("Spain"));
        assert_eq!(title.countries_for(true).count(), 1);
        assert_eq!(title.countries_for(false).count(), 2);
    }

    #[test]
    fn dto_flattens_associations() {
        let title = CatalogTitle::builder(3, "s3", TitleKind::TvShow, "Show", 2019)
            .genres(vec!["TV Dramas".into()])
            .countries(vec!["Japan".into()])
            .date_added(NaiveDate::from_ymd_opt(2021, 9, 25).unwrap())
            .build();

        let json = serde_json::to_value(TitleDto::from(title)).unwrap();
        assert_eq!(json["type"], "TV Show");
        assert_eq!(json["showId"], "s3");
        assert_eq!(json["dateAdded"], "2021-09-25");
        assert_eq!(json["releaseYear"], 2019);
        assert_eq!(json["countries"], serde_json::json!(["Japan"]));
        assert_eq!(json["genres"], serde_json::json!(["TV Dramas"]));
        assert!(json["director"].is_null());
    }
}
