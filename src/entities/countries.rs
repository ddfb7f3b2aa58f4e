use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    /// ISO 3166-1 alpha-3.
    pub iso_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::title_countries::Entity")]
    TitleCountries,
}

impl Related<super::title_countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleCountries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
