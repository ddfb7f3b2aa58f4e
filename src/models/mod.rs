pub mod row;
pub mod stats;
pub mod title;

pub use row::CatalogRow;
pub use stats::{
    CatalogSummary, CountryStat, GenreStat, ScatterPoint, SearchResults, TimelinePoint, TitleList,
};
pub use title::{CatalogTitle, CatalogTitleBuilder, CountryLink, TitleDto};
