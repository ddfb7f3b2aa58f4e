//! In-memory reductions behind every dashboard view.
//!
//! Nothing here touches the store: callers fetch the matching titles and
//! hand them over as a slice.

pub mod aggregate;
pub mod insights;

pub use aggregate::{Tally, country_stats, genre_stats, scatter, timeline};
pub use insights::{Insight, InsightKind, InsightValue};
