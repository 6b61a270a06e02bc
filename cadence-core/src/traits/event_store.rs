use chrono::{DateTime, Utc};

use crate::errors::CadenceResult;
use crate::events::{
    ChangeListRecordId, CoverageKind, DeploymentEvent, EnvironmentId, ProjectId,
    ServiceStatusEvent,
};
use crate::models::TimeWindow;

/// A change list's creation time, projected for windowed folds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeListTime {
    pub change_list_id: ChangeListRecordId,
    pub time: DateTime<Utc>,
}

/// The earliest passed deployment time of one change list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeListDeploymentTime {
    pub change_list_id: ChangeListRecordId,
    pub time: DateTime<Utc>,
}

/// A coverage value with the update time it is windowed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSample {
    pub value: f64,
    pub last_update_time: DateTime<Utc>,
}

/// Read-only access to the time-stamped event collections.
///
/// This is the seam between the metric computers and persistence: every
/// query filters by project or environment and by a half-open
/// [`TimeWindow`], and returns rows ordered by time ascending. Computers
/// call each query at most once per batch computation and fold the rest in
/// memory.
pub trait IEventStore: Send + Sync {
    /// Change-list creation times for a project, time ascending.
    fn change_list_times_in(
        &self,
        project_id: ProjectId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<ChangeListTime>>;

    /// The earliest passed deployment per change list within the window,
    /// for one environment.
    fn first_passed_deployment_times_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<ChangeListDeploymentTime>>;

    /// All deployments (passed and failed) for an environment, time ascending.
    fn deployments_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<DeploymentEvent>>;

    /// Times of passed deployments for an environment, ascending.
    fn passed_deployment_times_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<DateTime<Utc>>>;

    /// Service-status reports for an environment, time ascending.
    fn service_status_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<ServiceStatusEvent>>;

    /// Coverage samples of one kind for a project, ordered by
    /// `last_update_time` ascending.
    fn coverage_samples_in(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        window: TimeWindow,
    ) -> CadenceResult<Vec<CoverageSample>>;

    /// The most recently updated coverage value in the window, if any.
    /// Fast path for single-timestamp overall coverage.
    fn latest_coverage_value_in(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        window: TimeWindow,
    ) -> CadenceResult<Option<f64>>;

    /// Store-side mean of coverage values in the window, if any exist.
    /// Fast path for single-timestamp incremental coverage.
    fn average_coverage_value_in(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        window: TimeWindow,
    ) -> CadenceResult<Option<f64>>;
}
