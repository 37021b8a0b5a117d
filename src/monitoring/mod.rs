#[cfg(feature = "reporting")]
pub mod report;
pub mod stats;

#[cfg(feature = "reporting")]
pub use report::CspViolationReport;
pub use stats::CspStats;
