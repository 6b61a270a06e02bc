/// Daily-report parameter validation failures.
///
/// These are the caller's responsibility and are rejected before any
/// computation starts.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("checking period must be at least 1 day, got {days}")]
    InvalidCheckingPeriod { days: u32 },

    #[error("period ends before it starts")]
    PeriodEndsBeforeStart,

    #[error("period of {days} days exceeds the maximum of {max} days")]
    PeriodTooLong { days: i64, max: u32 },

    #[error("period end date must not be in the future")]
    PeriodEndInFuture,
}
