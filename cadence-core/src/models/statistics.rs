use serde::{Deserialize, Serialize};

/// The four DORA delivery-performance metrics.
///
/// The metric set is fixed, so dispatch over it is a closed enum rather
/// than a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoraMetricKind {
    LeadTime,
    DeploymentFrequency,
    ChangeFailureRate,
    TimeToRestore,
}

/// Current values of all four DORA metrics for one environment.
///
/// `None` means "not enough data"; `time_to_restore` keeps its historical
/// `0` sentinel instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentStatistics {
    /// Average seconds between consecutive passed deployments.
    pub deployment_frequency: Option<f64>,
    /// Average seconds from change-list creation to first passed deployment.
    pub lead_time: Option<i64>,
    /// Average outage seconds; `0` when no outage was observed.
    pub time_to_restore: i64,
    /// Failed deployments as a percentage of all deployments.
    pub change_failure_rate: Option<f64>,
}
