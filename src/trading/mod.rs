pub mod streaks;
pub mod summary;
pub mod trade_analyzer;

pub use streaks::{compute_streaks, StreakSummary};
pub use summary::PerformanceSummary;
pub use trade_analyzer::{aggregate_all, aggregate_by, AggregationBucket, Dimension};
