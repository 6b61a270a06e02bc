//! Current-value statistics for one environment, the entry point used by
//! pass/fail evaluators and the environment overview.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use cadence_core::errors::CadenceResult;
use cadence_core::models::{Environment, EnvironmentStatistics};
use cadence_core::traits::IEventStore;

use crate::computer::MetricComputer;
use crate::dora::{
    ChangeFailureRateComputer, DeploymentFrequencyComputer, LeadTimeComputer,
    TimeToRestoreComputer,
};

/// Evaluate all four DORA metrics as of `at`. Each computer is constructed
/// fresh; none of them keeps state between calls.
pub fn compute_environment_statistics(
    store: &Arc<dyn IEventStore>,
    environment: &Environment,
    checking_period: Duration,
    at: DateTime<Utc>,
) -> CadenceResult<EnvironmentStatistics> {
    let deployment_frequency =
        DeploymentFrequencyComputer::new(store.clone(), environment.clone(), checking_period)
            .compute_for_single_timestamp(at)?;
    let lead_time = LeadTimeComputer::new(store.clone(), environment.clone(), checking_period)
        .compute_for_single_timestamp(at)?;
    let time_to_restore =
        TimeToRestoreComputer::new(store.clone(), environment.clone(), checking_period)
            .compute_for_single_timestamp(at)?;
    let change_failure_rate =
        ChangeFailureRateComputer::new(store.clone(), environment.clone(), checking_period)
            .compute_for_single_timestamp(at)?;

    Ok(EnvironmentStatistics {
        deployment_frequency,
        lead_time,
        time_to_restore,
        change_failure_rate,
    })
}
