//! Deployment frequency: average seconds between consecutive passed
//! deployments in the checking window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::config::defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD;
use cadence_core::errors::CadenceResult;
use cadence_core::models::{Environment, MetricDataPoint, TimeWindow};
use cadence_core::traits::IEventStore;

use crate::computer::{duration_seconds_f64, MetricComputer};
use crate::guard;

pub struct DeploymentFrequencyComputer {
    store: Arc<dyn IEventStore>,
    environment: Environment,
    checking_period: Duration,
    operations_threshold: u64,
}

impl DeploymentFrequencyComputer {
    /// One deployment yields no interval; two are the minimum that define
    /// a frequency. Below this the result is "not enough data".
    pub const MINIMUM_DEPLOYMENTS_REQUIRED: usize = 2;

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
}

impl MetricComputer for DeploymentFrequencyComputer {
    type Value = Option<f64>;

    fn label(&self) -> &'static str {
        "DeploymentFrequencyComputer"
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

        let all_times = self
            .store
            .passed_deployment_times_in(self.environment.id, fetch_window)?;

        guard::warn_if_operations_excessive(
            self.label(),
            num_timestamps,
            all_times.len(),
            self.operations_threshold,
        );

        let mut frequencies = Vec::with_capacity(num_timestamps);
        for i in 0..num_timestamps {
            let current = first_timestamp + step_length * (i as i32);
            let window = TimeWindow::bounded(current - self.checking_period, current);
            // `all_times` is sorted, so the window's bounds are its ends.
            let in_window: Vec<DateTime<Utc>> = all_times
                .iter()
                .copied()
                .filter(|t| window.contains(*t))
                .collect();

            let value = match (in_window.first(), in_window.last()) {
                (Some(first), Some(last))
                    if in_window.len() >= Self::MINIMUM_DEPLOYMENTS_REQUIRED =>
                {
                    Some(duration_seconds_f64(*last - *first) / (in_window.len() - 1) as f64)
                }
                _ => None,
            };
            frequencies.push(MetricDataPoint::new(current, value));
        }
        Ok(frequencies)
    }
}
