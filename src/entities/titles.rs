use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub show_id: String,
    /// `Movie` or `TV Show`.
    pub kind: String,
    pub name: String,
    /// `name` lowercased for search.
    pub name_folded: String,
    pub director: Option<String>,
    pub cast_members: Option<String>,
    /// ISO `YYYY-MM-DD`.
    pub date_added: Option<String>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::title_genres::Entity")]
    TitleGenres,
    #[sea_orm(has_many = "super::title_countries::Entity")]
    TitleCountries,
}

impl Related<super::title_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleGenres.def()
    }
}

impl Related<super::title_countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleCountries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
