use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChangeListRecordId, ProjectId};

/// A unit of code change merged into the default branch.
///
/// `external_id` and `commit_hash` are each unique within their project;
/// the store enforces this at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeListEvent {
    pub id: ChangeListRecordId,
    pub project_id: ProjectId,
    pub external_id: String,
    pub commit_hash: String,
    pub title: Option<String>,
    pub time: DateTime<Utc>,
}
