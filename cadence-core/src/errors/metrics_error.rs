/// Metric-computation contract violations.
///
/// Missing or insufficient data is never an error: computers report it as
/// `None` (or `0` for time-to-restore) so dashboards can render "not
/// enough data". These variants only cover broken internal invariants.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("expected {expected} data points but computed {actual}")]
    DataPointCountMismatch { expected: usize, actual: usize },
}
