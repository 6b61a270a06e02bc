//! SqliteEventStore — owns the connection, runs migrations on open,
//! validates writes, and implements the read-only IEventStore seam.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use cadence_core::errors::{CadenceResult, StorageError};
use cadence_core::events::{
    ChangeListEvent, CoverageEvent, CoverageKind, DeployStatus, DeploymentEvent, EnvironmentId,
    ProjectId, ServiceStatus, ServiceStatusEvent,
};
use cadence_core::models::{Environment, TimeWindow};
use cadence_core::traits::{
    ChangeListDeploymentTime, ChangeListTime, CoverageSample, IEventStore,
};

use crate::migrations;
use crate::queries::{
    change_list_ops, coverage_ops, deployment_ops, environment_ops, service_status_ops,
};
use crate::to_storage_err;

pub use change_list_ops::NewChangeList;

/// The event store. A single serialized connection is enough here: writes
/// arrive one report at a time from collectors, and reads are bounded
/// range scans.
pub struct SqliteEventStore {
    conn: Mutex<Connection>,
}

impl SqliteEventStore {
    /// Open a store backed by a file on disk, applying migrations.
    pub fn open(path: &Path) -> CadenceResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing), applying migrations.
    pub fn open_in_memory() -> CadenceResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> CadenceResult<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> CadenceResult<T>) -> CadenceResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned"))?;
        f(&conn)
    }

    // --- Write side ---

    /// Register (or re-register) a deployment target.
    pub fn register_environment(&self, environment: &Environment) -> CadenceResult<()> {
        self.with_conn(|conn| environment_ops::upsert_environment(conn, environment))
    }

    /// Look up a registered environment.
    pub fn environment(&self, id: EnvironmentId) -> CadenceResult<Option<Environment>> {
        self.with_conn(|conn| environment_ops::get_environment(conn, id))
    }

    /// Record one merged change list.
    pub fn record_change_list(
        &self,
        project_id: ProjectId,
        new: &NewChangeList,
    ) -> CadenceResult<ChangeListEvent> {
        self.with_conn(|conn| change_list_ops::insert_change_list(conn, project_id, new))
    }

    /// Record a batch of change lists in one transaction.
    pub fn record_change_lists(
        &self,
        project_id: ProjectId,
        batch: &[NewChangeList],
    ) -> CadenceResult<usize> {
        self.with_conn(|conn| change_list_ops::insert_change_lists(conn, project_id, batch))
    }

    /// Record a deployment of the change list with `commit_hash` to
    /// `environment_id`.
    pub fn record_deployment(
        &self,
        environment_id: EnvironmentId,
        commit_hash: &str,
        status: DeployStatus,
        time: DateTime<Utc>,
    ) -> CadenceResult<DeploymentEvent> {
        self.with_conn(|conn| {
            let environment = require_environment(conn, environment_id)?;
            deployment_ops::insert_deployment(conn, &environment, commit_hash, status, time)
        })
    }

    /// Record an availability observation for an environment.
    pub fn record_service_status(
        &self,
        environment_id: EnvironmentId,
        status: ServiceStatus,
        time: DateTime<Utc>,
    ) -> CadenceResult<ServiceStatusEvent> {
        self.with_conn(|conn| {
            require_environment(conn, environment_id)?;
            service_status_ops::insert_service_status(conn, environment_id, status, time)
        })
    }

    /// Record a coverage report (upsert by non-empty version).
    pub fn record_coverage_report(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        value: f64,
        version: Option<&str>,
        time: DateTime<Utc>,
    ) -> CadenceResult<CoverageEvent> {
        self.with_conn(|conn| {
            coverage_ops::upsert_coverage_report(conn, project_id, kind, value, version, time)
        })
    }
}

/// Look up an environment, erroring when it was never registered.
fn require_environment(
    conn: &Connection,
    environment_id: EnvironmentId,
) -> CadenceResult<Environment> {
    environment_ops::get_environment(conn, environment_id)?
        .ok_or_else(|| StorageError::UnknownEnvironment { environment_id }.into())
}

impl IEventStore for SqliteEventStore {
    fn change_list_times_in(
        &self,
        project_id: ProjectId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<ChangeListTime>> {
        self.with_conn(|conn| change_list_ops::change_list_times_in(conn, project_id, window))
    }

    fn first_passed_deployment_times_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<ChangeListDeploymentTime>> {
        self.with_conn(|conn| {
            deployment_ops::first_passed_deployment_times_in(conn, environment_id, window)
        })
    }

    fn deployments_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<DeploymentEvent>> {
        self.with_conn(|conn| deployment_ops::deployments_in(conn, environment_id, window))
    }

    fn passed_deployment_times_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<DateTime<Utc>>> {
        self.with_conn(|conn| {
            deployment_ops::passed_deployment_times_in(conn, environment_id, window)
        })
    }

    fn service_status_in(
        &self,
        environment_id: EnvironmentId,
        window: TimeWindow,
    ) -> CadenceResult<Vec<ServiceStatusEvent>> {
        self.with_conn(|conn| service_status_ops::service_status_in(conn, environment_id, window))
    }

    fn coverage_samples_in(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        window: TimeWindow,
    ) -> CadenceResult<Vec<CoverageSample>> {
        self.with_conn(|conn| coverage_ops::coverage_samples_in(conn, project_id, kind, window))
    }

    fn latest_coverage_value_in(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        window: TimeWindow,
    ) -> CadenceResult<Option<f64>> {
        self.with_conn(|conn| {
            coverage_ops::latest_coverage_value_in(conn, project_id, kind, window)
        })
    }

    fn average_coverage_value_in(
        &self,
        project_id: ProjectId,
        kind: CoverageKind,
        window: TimeWindow,
    ) -> CadenceResult<Option<f64>> {
        self.with_conn(|conn| {
            coverage_ops::average_coverage_value_in(conn, project_id, kind, window)
        })
    }
}
