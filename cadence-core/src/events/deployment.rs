use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChangeListRecordId, EnvironmentId};

/// Outcome of a deployment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Pass,
    Fail,
}

impl DeployStatus {
    /// Stable textual form used by the store.
    pub fn as_str(self) -> &'static str {
        match self {
            DeployStatus::Pass => "pass",
            DeployStatus::Fail => "fail",
        }
    }

    /// Parse the stable textual form. Returns `None` for unknown input.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pass" => Some(DeployStatus::Pass),
            "fail" => Some(DeployStatus::Fail),
            _ => None,
        }
    }
}

/// A deployment of one change list to one environment.
///
/// The referenced change list always belongs to the same project as the
/// environment; the store resolves deployments by commit hash within that
/// project, so the invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentEvent {
    pub id: i64,
    pub environment_id: EnvironmentId,
    pub change_list_id: ChangeListRecordId,
    pub status: DeployStatus,
    pub time: DateTime<Utc>,
}
