use serde::{Deserialize, Serialize};

use crate::events::{EnvironmentId, ProjectId};

/// A deployment target (e.g. staging, production) belonging to one project.
///
/// Metric computers are constructed against an environment; change lists
/// are looked up through its `project_id`, deployments and service status
/// through its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub project_id: ProjectId,
    pub name: String,
}
