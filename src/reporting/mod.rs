pub mod report;

pub use report::{DimensionReport, PerformanceReport};
