use std::collections::HashMap;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, LikeExpr, Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::info;

use crate::catalog::iso_code_for;
use crate::domain::{TitleId, TitleKind, TitleQuery};
use crate::entities::{countries, genres, prelude::*, title_countries, title_genres, titles};
use crate::models::{CatalogRow, CatalogTitle, CountryLink};
use crate::services::catalog_store::{TitleOrder, TitlePage};

/// Title ids per association lookup, below SQLite's bound-variable limit.
const ID_CHUNK: usize = 900;

/// Rows per multi-row insert. Titles carry 11 columns, so 80 rows stay under
/// 999 parameters; association rows are narrower.
const TITLE_BATCH: usize = 80;
const LINK_BATCH: usize = 200;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Counts written by [`CatalogRepository::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedCounts {
    pub titles: usize,
    pub genres: usize,
    pub countries: usize,
}

pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Translates a [`TitleQuery`] into a `WHERE` condition on `titles`.
    ///
    /// Genre and country restrictions become `id IN (SELECT ...)` over the
    /// association tables.
    #[must_use]
    pub fn condition(query: &TitleQuery) -> Condition {
        let mut cond = Condition::all()
            .add(titles::Column::ReleaseYear.gte(query.years.min))
            .add(titles::Column::ReleaseYear.lte(query.years.max));

        if !query.kinds.is_empty() {
            cond = cond.add(
                titles::Column::Kind.is_in(query.kinds.iter().map(TitleKind::as_str)),
            );
        }

        if !query.genres.is_empty() {
            cond = cond.add(
                titles::Column::Id.in_subquery(
                    Query::select()
                        .column((TitleGenres, title_genres::Column::TitleId))
                        .from(TitleGenres)
                        .inner_join(
                            Genres,
                            Expr::col((Genres, genres::Column::Id))
                                .equals((TitleGenres, title_genres::Column::GenreId)),
                        )
                        .and_where(
                            Expr::col((Genres, genres::Column::Name))
                                .is_in(query.genres.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }

        if let Some(countries_match) = &query.countries {
            let mut sub = Query::select();
            sub.column((TitleCountries, title_countries::Column::TitleId))
                .from(TitleCountries)
                .inner_join(
                    Countries,
                    Expr::col((Countries, countries::Column::Id))
                        .equals((TitleCountries, title_countries::Column::CountryId)),
                )
                .and_where(
                    Expr::col((Countries, countries::Column::Name))
                        .is_in(countries_match.names.iter().cloned()),
                );
            if countries_match.primary_only {
                sub.and_where(
                    Expr::col((TitleCountries, title_countries::Column::IsPrimary)).eq(true),
                );
            }
            cond = cond.add(titles::Column::Id.in_subquery(sub.to_owned()));
        }

        if let Some(needle) = &query.name_contains {
            cond = cond.add(name_contains(needle));
        }

        cond
    }

    pub async fn count(&self, query: &TitleQuery) -> Result<u64> {
        let n = Titles::find()
            .filter(Self::condition(query))
            .count(&self.conn)
            .await?;
        Ok(n)
    }

    pub async fn fetch(&self, query: &TitleQuery, page: &TitlePage) -> Result<Vec<CatalogTitle>> {
        let mut select = Titles::find().filter(Self::condition(query));

        select = match page.order {
            TitleOrder::Catalog => select.order_by_asc(titles::Column::Id),
            TitleOrder::ReleaseYearDesc => select
                .order_by_desc(titles::Column::ReleaseYear)
                .order_by_asc(titles::Column::Id),
        };

        if let Some(limit) = page.limit {
            select = select.limit(limit);
        }
        if page.offset > 0 {
            select = select.offset(page.offset);
        }

        let models = select.all(&self.conn).await?;
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut genre_links = self.genre_links(&ids).await?;
        let mut country_links = self.country_links(&ids).await?;

        models
            .into_iter()
            .map(|model| {
                let genres = genre_links.remove(&model.id).unwrap_or_default();
                let countries = country_links.remove(&model.id).unwrap_or_default();
                Self::map_title(model, genres, countries)
            })
            .collect()
    }

    fn map_title(
        model: titles::Model,
        genres: Vec<String>,
        countries: Vec<CountryLink>,
    ) -> Result<CatalogTitle> {
        let kind = TitleKind::parse(&model.kind)
            .ok_or_else(|| anyhow!("Unknown title type '{}' for {}", model.kind, model.show_id))?;

        Ok(CatalogTitle {
            id: TitleId::new(model.id),
            show_id: model.show_id,
            kind,
            name: model.name,
            director: model.director,
            cast: model.cast_members,
            date_added: model
                .date_added
                .and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()),
            release_year: model.release_year,
            rating: model.rating,
            duration: model.duration,
            description: model.description,
            genres,
            countries,
        })
    }

    async fn genre_links(&self, ids: &[i32]) -> Result<HashMap<i32, Vec<String>>> {
        let mut links: HashMap<i32, Vec<String>> = HashMap::new();

        for chunk in ids.chunks(ID_CHUNK) {
            let rows: Vec<(i32, String)> = TitleGenres::find()
                .select_only()
                .column(title_genres::Column::TitleId)
                .column(genres::Column::Name)
                .join(JoinType::InnerJoin, title_genres::Relation::Genre.def())
                .filter(title_genres::Column::TitleId.is_in(chunk.to_vec()))
                .order_by_asc(title_genres::Column::TitleId)
                .order_by_asc(title_genres::Column::Position)
                .into_tuple()
                .all(&self.conn)
                .await?;

            for (title_id, name) in rows {
                links.entry(title_id).or_default().push(name);
            }
        }

        Ok(links)
    }

    async fn country_links(&self, ids: &[i32]) -> Result<HashMap<i32, Vec<CountryLink>>> {
        let mut links: HashMap<i32, Vec<CountryLink>> = HashMap::new();

        for chunk in ids.chunks(ID_CHUNK) {
            let rows: Vec<(i32, String, Option<String>, bool)> = TitleCountries::find()
                .select_only()
                .column(title_countries::Column::TitleId)
                .column(countries::Column::Name)
                .column(countries::Column::IsoCode)
                .column(title_countries::Column::IsPrimary)
                .join(JoinType::InnerJoin, title_countries::Relation::Country.def())
                .filter(title_countries::Column::TitleId.is_in(chunk.to_vec()))
                .order_by_asc(title_countries::Column::TitleId)
                .order_by_asc(title_countries::Column::Position)
                .into_tuple()
                .all(&self.conn)
                .await?;

            for (title_id, name, iso, is_primary) in rows {
                links
                    .entry(title_id)
                    .or_default()
                    .push(CountryLink::new(name, iso, is_primary));
            }
        }

        Ok(links)
    }

    pub async fn count_genres(&self) -> Result<u64> {
        Ok(Genres::find().count(&self.conn).await?)
    }

    pub async fn count_countries(&self) -> Result<u64> {
        Ok(Countries::find().count(&self.conn).await?)
    }

    pub async fn release_year_bounds(&self) -> Result<Option<(i32, i32)>> {
        let row: Option<(Option<i32>, Option<i32>)> = Titles::find()
            .select_only()
            .column_as(titles::Column::ReleaseYear.min(), "min_year")
            .column_as(titles::Column::ReleaseYear.max(), "max_year")
            .into_tuple()
            .one(&self.conn)
            .await?;

        Ok(row.and_then(|(min, max)| min.zip(max)))
    }

    pub async fn genre_usage(&self) -> Result<Vec<(String, u64)>> {
        let rows: Vec<(String, i64)> = TitleGenres::find()
            .select_only()
            .column(genres::Column::Name)
            .column_as(title_genres::Column::GenreId.count(), "uses")
            .join(JoinType::InnerJoin, title_genres::Relation::Genre.def())
            .group_by(genres::Column::Id)
            .group_by(genres::Column::Name)
            .order_by_asc(genres::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|(name, n)| (name, to_count(n))).collect())
    }

    pub async fn country_usage(&self) -> Result<Vec<(String, u64)>> {
        let rows: Vec<(String, i64)> = TitleCountries::find()
            .select_only()
            .column(countries::Column::Name)
            .column_as(title_countries::Column::CountryId.count(), "uses")
            .join(JoinType::InnerJoin, title_countries::Relation::Country.def())
            .group_by(countries::Column::Id)
            .group_by(countries::Column::Name)
            .order_by_asc(countries::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|(name, n)| (name, to_count(n))).collect())
    }

    /// Clears the catalog and writes `rows` in one transaction.
    ///
    /// Ids are assigned in row order; genres and countries get ids in the
    /// order they are first seen.
    pub async fn replace(&self, rows: &[CatalogRow]) -> Result<SeedCounts> {
        let txn = self.conn.begin().await?;

        TitleCountries::delete_many().exec(&txn).await?;
        TitleGenres::delete_many().exec(&txn).await?;
        Titles::delete_many().exec(&txn).await?;
        Genres::delete_many().exec(&txn).await?;
        Countries::delete_many().exec(&txn).await?;

        let mut genre_ids: HashMap<&str, i32> = HashMap::new();
        let mut country_ids: HashMap<&str, i32> = HashMap::new();
        let mut genre_models = Vec::new();
        let mut country_models = Vec::new();
        let mut title_models = Vec::with_capacity(rows.len());
        let mut genre_link_models = Vec::new();
        let mut country_link_models = Vec::new();

        for (title_id, row) in (1..).zip(rows) {
            title_models.push(titles::ActiveModel {
                id: Set(title_id),
                show_id: Set(row.show_id.clone()),
                kind: Set(row.kind.as_str().to_string()),
                name: Set(row.name.clone()),
                name_folded: Set(row.name.to_lowercase()),
                director: Set(row.director.clone()),
                cast_members: Set(row.cast.clone()),
                date_added: Set(row.date_added.map(|d| d.format(DATE_FORMAT).to_string())),
                release_year: Set(row.release_year),
                rating: Set(row.rating.clone()),
                duration: Set(row.duration.clone()),
                description: Set(row.description.clone()),
            });

            for (position, name) in (0..).zip(&row.genres) {
                let next = i32::try_from(genre_ids.len() + 1)?;
                let genre_id = *genre_ids.entry(name.as_str()).or_insert_with(|| {
                    genre_models.push(genres::ActiveModel {
                        id: Set(next),
                        name: Set(name.clone()),
                    });
                    next
                });
                genre_link_models.push(title_genres::ActiveModel {
                    title_id: Set(title_id),
                    genre_id: Set(genre_id),
                    position: Set(position),
                });
            }

            for (position, name) in (0..).zip(&row.countries) {
                let next = i32::try_from(country_ids.len() + 1)?;
                let country_id = *country_ids.entry(name.as_str()).or_insert_with(|| {
                    country_models.push(countries::ActiveModel {
                        id: Set(next),
                        name: Set(name.clone()),
                        iso_code: Set(iso_code_for(name).map(str::to_string)),
                    });
                    next
                });
                country_link_models.push(title_countries::ActiveModel {
                    title_id: Set(title_id),
                    country_id: Set(country_id),
                    position: Set(position),
                    is_primary: Set(position == 0),
                });
            }
        }

        for chunk in genre_models.chunks(LINK_BATCH) {
            Genres::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in country_models.chunks(LINK_BATCH) {
            Countries::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in title_models.chunks(TITLE_BATCH) {
            Titles::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in genre_link_models.chunks(LINK_BATCH) {
            TitleGenres::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in country_link_models.chunks(LINK_BATCH) {
            TitleCountries::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        let counts = SeedCounts {
            titles: title_models.len(),
            genres: genre_models.len(),
            countries: country_models.len(),
        };
        info!(
            titles = counts.titles,
            genres = counts.genres,
            countries = counts.countries,
            "Catalog replaced"
        );
        Ok(counts)
    }
}

const LIKE_ESCAPE: char = '!';

/// Case-insensitive substring match on the title name, with `LIKE`
/// wildcards in the needle escaped.
///
/// Both sides are folded with Rust's Unicode lowercasing. SQLite `lower()`
/// only folds ASCII, so it never touches the column.
fn name_contains(needle: &str) -> SimpleExpr {
    let escaped = needle
        .to_lowercase()
        .replace(LIKE_ESCAPE, "!!")
        .replace('%', "!%")
        .replace('_', "!_");

    Expr::col((Titles, titles::Column::NameFolded))
        .like(LikeExpr::new(format!("%{escaped}%")).escape(LIKE_ESCAPE))
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

