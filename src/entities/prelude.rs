pub use super::countries::Entity as Countries;
pub use super::genres::Entity as Genres;
pub use super::title_countries::Entity as TitleCountries;
pub use super::title_genres::Entity as TitleGenres;
pub use super::titles::Entity as Titles;
