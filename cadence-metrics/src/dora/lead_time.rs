//! Lead time: average seconds from a change list's creation to its first
//! passed deployment, over the checking window.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::config::defaults::DEFAULT_COMPUTE_OPERATIONS_THRESHOLD;
use cadence_core::errors::CadenceResult;
use cadence_core::events::ChangeListRecordId;
use cadence_core::models::{Environment, MetricDataPoint, TimeWindow};
use cadence_core::traits::{ChangeListDeploymentTime, ChangeListTime, IEventStore};

use crate::computer::{duration_seconds_f64, MetricComputer};
use crate::guard;

pub struct LeadTimeComputer {
    store: Arc<dyn IEventStore>,
    environment: Environment,
    checking_period: Duration,
    operations_threshold: u64,
}

impl LeadTimeComputer {
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

    /// Average lead time over one window, in whole seconds.
    ///
    /// Walks change lists newest-first, tracking the earliest passed
    /// deployment time seen so far: deployments roll forward every change
    /// list merged before them, so a change list's lead time is bounded by
    /// the nearest completed rollout at or after it. Change lists older
    /// than every observed deployment are skipped. The walk is a plain
    /// loop, so windows with thousands of change lists cost no stack
    /// depth.
    fn single_timestamp_average(
        change_lists: &[ChangeListTime],
        first_deployments: &HashMap<ChangeListRecordId, DateTime<Utc>>,
        window: TimeWindow,
    ) -> Option<i64> {
        let mut closest_passed_deployment_time: Option<DateTime<Utc>> = None;
        let mut total_lead_time = Duration::zero();
        let mut lead_times_count: i64 = 0;

        for change_list in change_lists
            .iter()
            .rev()
            .filter(|c| window.contains(c.time))
        {
            let first_passed = first_deployments.get(&change_list.change_list_id).copied();

            if closest_passed_deployment_time.is_none() {
                closest_passed_deployment_time = first_passed;
            }
            if let (Some(first), Some(closest)) = (first_passed, closest_passed_deployment_time) {
                if first < closest {
                    closest_passed_deployment_time = Some(first);
                }
            }

            let Some(closest) = closest_passed_deployment_time else {
                continue;
            };
            total_lead_time = total_lead_time + (closest - change_list.time);
            lead_times_count += 1;
        }

        if lead_times_count == 0 {
            None
        } else {
            let average = duration_seconds_f64(total_lead_time) / lead_times_count as f64;
            Some(average.round() as i64)
        }
    }
}

impl MetricComputer for LeadTimeComputer {
    type Value = Option<i64>;

    fn label(&self) -> &'static str {
        "LeadTimeComputer"
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

        let first_deployments = self
            .store
            .first_passed_deployment_times_in(self.environment.id, fetch_window)?;
        let change_lists = self
            .store
            .change_list_times_in(self.environment.project_id, fetch_window)?;

        guard::warn_if_operations_excessive(
            self.label(),
            num_timestamps,
            change_lists.len() + first_deployments.len(),
            self.operations_threshold,
        );

        let mut result = Vec::with_capacity(num_timestamps);
        for i in 0..num_timestamps {
            let current = first_timestamp + step_length * (i as i32);
            let window = TimeWindow::bounded(current - self.checking_period, current);
            let deployments_in_window: HashMap<ChangeListRecordId, DateTime<Utc>> =
                first_deployments
                    .iter()
                    .filter(|d| window.contains(d.time))
                    .map(|d: &ChangeListDeploymentTime| (d.change_list_id, d.time))
                    .collect();
            let value =
                Self::single_timestamp_average(&change_lists, &deployments_in_window, window);
            result.push(MetricDataPoint::new(current, value));
        }
        Ok(result)
    }
}
