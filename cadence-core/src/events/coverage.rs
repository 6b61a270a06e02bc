use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProjectId;

/// Which coverage figure a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageKind {
    /// Test coverage of the whole codebase.
    Overall,
    /// Test coverage of the lines changed since the last report.
    Incremental,
}

impl CoverageKind {
    /// Stable textual form used by the store.
    pub fn as_str(self) -> &'static str {
        match self {
            CoverageKind::Overall => "overall",
            CoverageKind::Incremental => "incremental",
        }
    }

    /// Parse the stable textual form. Returns `None` for unknown input.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "overall" => Some(CoverageKind::Overall),
            "incremental" => Some(CoverageKind::Incremental),
            _ => None,
        }
    }
}

/// A test-coverage report for a project.
///
/// Reports carrying a non-empty `version` are upserted: re-recording the
/// same version replaces `value` and advances `last_update_time`. All
/// windowing is done on `last_update_time`, not `recorded_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageEvent {
    pub id: i64,
    pub project_id: ProjectId,
    pub kind: CoverageKind,
    /// Percentage in [0, 100].
    pub value: f64,
    pub version: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub last_update_time: DateTime<Utc>,
}
