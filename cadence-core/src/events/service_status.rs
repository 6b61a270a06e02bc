use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EnvironmentId;

/// Observed availability of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
}

impl ServiceStatus {
    /// Stable textual form used by the store.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceStatus::Up => "up",
            ServiceStatus::Down => "down",
        }
    }

    /// Parse the stable textual form. Returns `None` for unknown input.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(ServiceStatus::Up),
            "down" => Some(ServiceStatus::Down),
            _ => None,
        }
    }
}

/// A point-in-time availability report for an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatusEvent {
    pub id: i64,
    pub environment_id: EnvironmentId,
    pub status: ServiceStatus,
    pub time: DateTime<Utc>,
}
