//! # cadence-metrics
//!
//! The windowed metric computation engine. Every computer implements one
//! contract (compute a value per timestamp over a sliding half-open
//! window, fetching events once for the whole range and folding in
//! memory) and derives single-timestamp evaluation and day-bucketed
//! chart data from it.

pub mod computer;
pub mod coverage;
pub mod dora;
pub mod guard;
pub mod report;
pub mod statistics;

pub use computer::MetricComputer;
pub use coverage::{IncrementalCoverageComputer, OverallCoverageComputer};
pub use dora::{
    ChangeFailureRateComputer, DeploymentFrequencyComputer, LeadTimeComputer,
    TimeToRestoreComputer,
};
pub use report::{compute_daily_dora_graph, DailyReportParams, DailyReportRequest};
pub use statistics::compute_environment_statistics;
