//! Coverage metric computers: latest overall coverage and mean
//! incremental coverage, with an optional unbounded lookback.
//!
//! Both share the same fetch-once/fold-many windowing over coverage
//! samples; they differ only in the per-window fold and in their
//! single-timestamp fast paths.

pub mod incremental;
pub mod overall;

pub use incremental::IncrementalCoverageComputer;
pub use overall::OverallCoverageComputer;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::errors::CadenceResult;
use cadence_core::events::{CoverageKind, ProjectId};
use cadence_core::models::{MetricDataPoint, TimeWindow};
use cadence_core::traits::{CoverageSample, IEventStore};

use crate::guard;

/// Shared state and windowing of both coverage computers.
pub(crate) struct CoverageWindowing {
    pub store: Arc<dyn IEventStore>,
    pub project_id: ProjectId,
    /// `None` means the window extends unbounded into the past.
    pub checking_period: Option<Duration>,
    pub operations_threshold: u64,
}

impl CoverageWindowing {
    /// The window evaluated at `end`: `[end - checking_period, end)`, or
    /// `(-inf, end)` without a checking period. Coverage windows filter on
    /// a sample's `last_update_time`.
    pub fn window_ending_at(&self, end: DateTime<Utc>) -> TimeWindow {
        match self.checking_period {
            Some(period) => TimeWindow::bounded(end - period, end),
            None => TimeWindow::up_to(end),
        }
    }

    /// The single fetch window covering a whole consecutive-timestamps
    /// request.
    fn fetch_window(&self, first: DateTime<Utc>, last: DateTime<Utc>) -> TimeWindow {
        match self.checking_period {
            Some(period) => TimeWindow::bounded(first - period, last),
            None => TimeWindow::up_to(last),
        }
    }

    /// Fetch once, then fold each timestamp's window with `fold`.
    pub fn compute_consecutive(
        &self,
        label: &'static str,
        kind: CoverageKind,
        first_timestamp: DateTime<Utc>,
        num_timestamps: usize,
        step_length: Duration,
        fold: impl Fn(&[CoverageSample]) -> Option<f64>,
    ) -> CadenceResult<Vec<MetricDataPoint<Option<f64>>>> {
        let last_timestamp = first_timestamp + step_length * (num_timestamps.saturating_sub(1) as i32);
        let samples = self.store.coverage_samples_in(
            self.project_id,
            kind,
            self.fetch_window(first_timestamp, last_timestamp),
        )?;

        guard::warn_if_operations_excessive(
            label,
            num_timestamps,
            samples.len(),
            self.operations_threshold,
        );

        let mut points = Vec::with_capacity(num_timestamps);
        for i in 0..num_timestamps {
            let current = first_timestamp + step_length * (i as i32);
            let window = self.window_ending_at(current);
            let in_window: Vec<CoverageSample> = samples
                .iter()
                .copied()
                .filter(|s| window.contains(s.last_update_time))
                .collect();
            points.push(MetricDataPoint::new(current, fold(&in_window)));
        }
        Ok(points)
    }
}
