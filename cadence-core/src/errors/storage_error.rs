/// Storage-layer errors for SQLite operations and write-time validation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("unknown environment {environment_id}")]
    UnknownEnvironment { environment_id: i64 },

    #[error("commit hash length must be 40, got {length}")]
    InvalidCommitHash { length: usize },

    #[error("change list {field} '{value}' already exists in project {project_id}")]
    DuplicateChangeList {
        project_id: i64,
        field: &'static str,
        value: String,
    },

    #[error("no change list with commit hash '{commit_hash}' in project {project_id}")]
    ChangeListNotFound {
        project_id: i64,
        commit_hash: String,
    },

    #[error("deployment at {deployment_time} predates its change list at {change_list_time}")]
    DeploymentBeforeChangeList {
        deployment_time: chrono::DateTime<chrono::Utc>,
        change_list_time: chrono::DateTime<chrono::Utc>,
    },

    #[error("coverage value {value} outside [0, 100]")]
    CoverageValueOutOfRange { value: f64 },
}
