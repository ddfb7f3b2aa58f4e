pub mod prelude;

pub mod countries;
pub mod genres;
pub mod title_countries;
pub mod title_genres;
pub mod titles;
