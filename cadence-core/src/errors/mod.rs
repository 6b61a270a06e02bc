pub mod metrics_error;
pub mod report_error;
pub mod storage_error;

pub use metrics_error::MetricsError;
pub use report_error::ReportError;
pub use storage_error::StorageError;

/// Top-level error type wrapping every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum CadenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("config parse error: {message}")]
    Config { message: String },
}

/// Result alias used across the workspace.
pub type CadenceResult<T> = Result<T, CadenceError>;
