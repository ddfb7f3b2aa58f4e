pub mod csv;
pub mod duration;

pub use csv::{CsvError, CsvReader, CsvRecord};
pub use duration::parse_duration;
