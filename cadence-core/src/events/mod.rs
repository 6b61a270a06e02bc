//! Immutable event records consumed by the metric computers.
//!
//! All four event kinds are facts owned by their collectors; the
//! computation layer only ever reads them, ordered by time, over a
//! half-open window.

pub mod change_list;
pub mod coverage;
pub mod deployment;
pub mod service_status;

pub use change_list::ChangeListEvent;
pub use coverage::{CoverageEvent, CoverageKind};
pub use deployment::{DeployStatus, DeploymentEvent};
pub use service_status::{ServiceStatus, ServiceStatusEvent};

/// Row id of a project.
pub type ProjectId = i64;

/// Row id of an environment (a deployment target belonging to one project).
pub type EnvironmentId = i64;

/// Row id of a recorded change list.
pub type ChangeListRecordId = i64;
