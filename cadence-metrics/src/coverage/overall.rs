use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::config::defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD;
use cadence_core::errors::CadenceResult;
use cadence_core::events::{CoverageKind, ProjectId};
use cadence_core::models::MetricDataPoint;
use cadence_core::traits::IEventStore;

use super::CoverageWindowing;
use crate::computer::MetricComputer;

/// Overall coverage: the value of the most recently updated report
/// strictly before the timestamp.
pub struct OverallCoverageComputer {
    windowing: CoverageWindowing,
}

impl OverallCoverageComputer {
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

impl MetricComputer for OverallCoverageComputer {
    type Value = Option<f64>;

    fn label(&self) -> &'static str {
        "OverallCoverageComputer"
    }

    fn compute_for_consecutive_timestamps(
        &self,
        first_timestamp: DateTime<Utc>,
        num_timestamps: usize,
        step_length: Duration,
    ) -> CadenceResult<Vec<MetricDataPoint<Self::Value>>> {
        self.windowing.compute_consecutive(
            self.label(),
            CoverageKind::Overall,
            first_timestamp,
            num_timestamps,
            step_length,
            // Samples arrive ordered by last_update_time, so the window's
            // latest report is its last element.
            |samples| samples.last().map(|s| s.value),
        )
    }

    // Direct single-point query: this is the most frequently requested
    // point (the project front page), so skip the full-range fetch.
    fn compute_for_single_timestamp(&self, timestamp: DateTime<Utc>) -> CadenceResult<Self::Value> {
        self.windowing.store.latest_coverage_value_in(
            self.windowing.project_id,
            CoverageKind::Overall,
            self.windowing.window_ending_at(timestamp),
        )
    }
}
