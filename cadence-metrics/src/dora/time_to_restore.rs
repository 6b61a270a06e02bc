//! Time to restore: average outage duration in the checking window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::config::defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD;
use cadence_core::errors::CadenceResult;
use cadence_core::events::{ServiceStatus, ServiceStatusEvent};
use cadence_core::models::{Environment, MetricDataPoint, TimeWindow};
use cadence_core::traits::IEventStore;

use crate::computer::MetricComputer;
use crate::guard;

pub struct TimeToRestoreComputer {
    store: Arc<dyn IEventStore>,
    environment: Environment,
    checking_period: Duration,
    operations_threshold: u64,
}

impl TimeToRestoreComputer {
    pub fn new(
        store: Arc<dyn IEventStore>,
        environment: Environment,
        checking_period: Duration,
    ) -> Self {
        Self {
            store,
            environment,
            checking_period,
            operations_threshold: DEFAULT_COMPUTE_OPERATIONS_THRESHOLD,
        }
    }

    /// Replace the default performance-warning threshold.
    pub fn with_operations_threshold(mut self, threshold: u64) -> Self {
        self.operations_threshold = threshold;
        self
    }

    /// Average outage duration in one window.
    ///
    /// The first Down of a run opens an outage, the first Up after it
    /// closes it; repeated Downs and repeated Ups are no-ops. An outage
    /// still open at the window's end is not counted.
    fn single_timestamp_average(
        reports: &[ServiceStatusEvent],
        window: TimeWindow,
    ) -> Option<Duration> {
        let mut total_down_time = Duration::zero();
        let mut open_outage_since: Option<DateTime<Utc>> = None;
        let mut count: i32 = 0;

        for report in reports.iter().filter(|r| window.contains(r.time)) {
            match report.status {
                ServiceStatus::Down => {
                    if open_outage_since.is_none() {
                        open_outage_since = Some(report.time);
                    }
                }
                ServiceStatus::Up => {
                    if let Some(down_since) = open_outage_since {
                        total_down_time = total_down_time + (report.time - down_since);
                        count += 1;
                        open_outage_since = None;
                    }
                }
            }
        }

        if count > 0 {
            Some(total_down_time / count)
        } else {
            None
        }
    }
}

impl MetricComputer for TimeToRestoreComputer {
    /// Average outage seconds. Unlike the other three DORA metrics, the
    /// no-data sentinel is `0`, not an absent value; kept for
    /// compatibility with the historical contract.
    type Value = i64;

    fn label(&self) -> &'static str {
        "TimeToRestoreComputer"
    }

    fn compute_for_consecutive_timestamps(
        &self,
        first_timestamp: DateTime<Utc>,
        num_timestamps: usize,
        step_length: Duration,
    ) -> CadenceResult<Vec<MetricDataPoint<Self::Value>>> {
        let last_timestamp = first_timestamp + step_length * (num_timestamps.saturating_sub(1) as i32);
        let fetch_window =
            TimeWindow::bounded(first_timestamp - self.checking_period, last_timestamp);

        let all_reports = self
            .store
            .service_status_in(self.environment.id, fetch_window)?;

        guard::warn_if_operations_excessive(
            self.label(),
            num_timestamps,
            all_reports.len(),
            self.operations_threshold,
        );

        let mut result = Vec::with_capacity(num_timestamps);
        for i in 0..num_timestamps {
            let current = first_timestamp + step_length * (i as i32);
            let window = TimeWindow::bounded(current - self.checking_period, current);
            let value = Self::single_timestamp_average(&all_reports, window)
                .map(|avg| avg.num_seconds())
                .unwrap_or(0);
            result.push(MetricDataPoint::new(current, value));
        }
        Ok(result)
    }
}
