//! Static catalog reference data.

pub mod consolidation;
pub mod iso_codes;

pub use consolidation::{consolidate, merge_stats, original_names_for, round_year};
pub use iso_codes::iso_code_for;
