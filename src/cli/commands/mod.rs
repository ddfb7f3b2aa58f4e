mod insights;
mod report;
mod search;
mod seed;
mod summary;

pub use insights::{cmd_insights, print_insights};
pub use report::cmd_report;
pub use search::cmd_search;
pub use seed::cmd_seed;
pub use summary::{cmd_summary, print_summary};
