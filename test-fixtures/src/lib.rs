//! Shared test harness for the metric computers.
//!
//! Opens an in-memory event store seeded with one project and one
//! environment, and offers builders that place events at second offsets
//! from a fixed base instant, so test scenarios read as plain numbers.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use cadence_core::events::{
    ChangeListEvent, CoverageKind, DeployStatus, ProjectId, ServiceStatus,
};
use cadence_core::models::Environment;
use cadence_storage::engine::NewChangeList;
use cadence_storage::SqliteEventStore;

/// In-memory store plus the environment every builder targets.
pub struct MetricsHarness {
    pub store: Arc<SqliteEventStore>,
    pub environment: Environment,
    /// Base instant all second offsets are relative to.
    pub base: DateTime<Utc>,
}

impl MetricsHarness {
    /// Fresh store with project 1 / environment 1 registered and the base
    /// instant fixed at 2000-01-01T00:00:00Z.
    pub fn new() -> Self {
        let store = SqliteEventStore::open_in_memory().expect("open in-memory store");
        let environment = Environment {
            id: 1,
            project_id: 1,
            name: "test-env".to_string(),
        };
        store
            .register_environment(&environment)
            .expect("register environment");
        Self {
            store: Arc::new(store),
            environment,
            base: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    /// The instant `secs` seconds after the base.
    pub fn at(&self, secs: i64) -> DateTime<Utc> {
        self.base + Duration::seconds(secs)
    }

    /// Record a change list in the harness project. The numeric id doubles
    /// as the external id and (zero-padded) commit hash.
    pub fn add_change_list(&self, id: u32, secs: i64) -> ChangeListEvent {
        self.add_change_list_for(self.environment.project_id, id, secs)
    }

    /// Record a change list in an arbitrary project.
    pub fn add_change_list_for(
        &self,
        project_id: ProjectId,
        id: u32,
        secs: i64,
    ) -> ChangeListEvent {
        self.store
            .record_change_list(
                project_id,
                &NewChangeList {
                    external_id: id.to_string(),
                    commit_hash: commit_hash(id),
                    title: None,
                    time: self.at(secs),
                },
            )
            .expect("record change list")
    }

    /// Record a deployment of `change_list` to the harness environment.
    pub fn add_deployment(&self, secs: i64, passed: bool, change_list: &ChangeListEvent) {
        let status = if passed {
            DeployStatus::Pass
        } else {
            DeployStatus::Fail
        };
        self.store
            .record_deployment(
                self.environment.id,
                &change_list.commit_hash,
                status,
                self.at(secs),
            )
            .expect("record deployment");
    }

    /// Record an availability observation for the harness environment.
    pub fn add_service_status(&self, secs: i64, up: bool) {
        let status = if up {
            ServiceStatus::Up
        } else {
            ServiceStatus::Down
        };
        self.store
            .record_service_status(self.environment.id, status, self.at(secs))
            .expect("record service status");
    }

    /// Record a versionless coverage report at an absolute instant.
    pub fn add_coverage(&self, kind: CoverageKind, value: f64, time: DateTime<Utc>) {
        self.store
            .record_coverage_report(self.environment.project_id, kind, value, None, time)
            .expect("record coverage report");
    }
}

impl Default for MetricsHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A syntactically valid 40-character commit hash derived from a number.
pub fn commit_hash(id: u32) -> String {
    format!("{id:040}")
}
