use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::config::defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD;
use cadence_core::errors::CadenceResult;
use cadence_core::events::{CoverageKind, ProjectId};
use cadence_core::models::MetricDataPoint;
use cadence_core::traits::IEventStore;

use super::CoverageWindowing;
use crate::computer::MetricComputer;

/// Incremental coverage: arithmetic mean of all report values in the
/// window.
pub struct IncrementalCoverageComputer {
    windowing: CoverageWindowing,
}

impl IncrementalCoverageComputer {
    pub fn new(
        store: Arc<dyn IEventStore>,
        project_id: ProjectId,
        checking_period: Option<Duration>,
    ) -> Self {
        Self {
            windowing: CoverageWindowing {
                store,
                project_id,
                checking_period,
                operations_threshold: DEFAULT_COMPUTE_OPERATIONS_THRESHOLD,
            },
        }
    }

    /// Replace the default performance-warning threshold.
    pub fn with_operations_threshold(mut self, threshold: u64) -> Self {
        self.windowing.operations_threshold = threshold;
        self
    }
}

impl MetricComputer for IncrementalCoverageComputer {
    type Value = Option<f64>;

    fn label(&self) -> &'static str {
        "IncrementalCoverageComputer"
    }

    fn compute_for_consecutive_timestamps(
        &self,
        first_timestamp: DateTime<Utc>,
        num_timestamps: usize,
        step_length: Duration,
    ) -> CadenceResult<Vec<MetricDataPoint<Self::Value>>> {
        self.windowing.compute_consecutive(
            self.label(),
            CoverageKind::Incremental,
            first_timestamp,
            num_timestamps,
            step_length,
            |samples| {
                if samples.is_empty() {
                    None
                } else {
                    let sum: f64 = samples.iter().map(|s| s.value).sum();
                    Some(sum / samples.len() as f64)
                }
            },
        )
    }

    // Direct single-point query: store-side average, same filters as the
    // general fold.
    fn compute_for_single_timestamp(&self, timestamp: DateTime<Utc>) -> CadenceResult<Self::Value> {
        self.windowing.store.average_coverage_value_in(
            self.windowing.project_id,
            CoverageKind::Incremental,
            self.windowing.window_ending_at(timestamp),
        )
    }
}
