//! Change failure rate: failed deployments as a percentage of all
//! deployments in the checking window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::config::defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD;
use cadence_core::errors::CadenceResult;
use cadence_core::events::DeployStatus;
use cadence_core::models::{Environment, MetricDataPoint, TimeWindow};
use cadence_core::traits::IEventStore;

use crate::computer::MetricComputer;
use crate::guard;

pub struct ChangeFailureRateComputer {
    store: Arc<dyn IEventStore>,
    environment: Environment,
    checking_period: Duration,
    operations_threshold: u64,
}

impl ChangeFailureRateComputer {
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

impl MetricComputer for ChangeFailureRateComputer {
    type Value = Option<f64>;

    fn label(&self) -> &'static str {
        "ChangeFailureRateComputer"
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

        let all_deployments = self
            .store
            .deployments_in(self.environment.id, fetch_window)?;

        guard::warn_if_operations_excessive(
            self.label(),
            num_timestamps,
            all_deployments.len(),
            self.operations_threshold,
        );

        let mut rates = Vec::with_capacity(num_timestamps);
        for i in 0..num_timestamps {
            let current = first_timestamp + step_length * (i as i32);
            let window = TimeWindow::bounded(current - self.checking_period, current);

            let mut total_count: usize = 0;
            let mut failed_count: usize = 0;
            for deployment in all_deployments.iter().filter(|d| window.contains(d.time)) {
                total_count += 1;
                if deployment.status == DeployStatus::Fail {
                    failed_count += 1;
                }
            }

            // None, not 0: "no deployments" must stay distinct from
            // "no failures".
            let value = if total_count > 0 {
                Some(failed_count as f64 / total_count as f64 * 100.0)
            } else {
                None
            };
            rates.push(MetricDataPoint::new(current, value));
        }
        Ok(rates)
    }
}
