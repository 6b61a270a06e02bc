//! Performance guard shared by every computer.
//!
//! A windowed fold touches each fetched event once per requested
//! timestamp, so its cost is `num_timestamps * fetched_events`. Ranges
//! large enough to time out show up in the logs before they degrade the
//! service.

/// Log a warning when the fold's operations count exceeds `threshold`.
/// Returns whether the warning fired. Never fails the computation.
pub fn warn_if_operations_excessive(
    computer: &'static str,
    num_timestamps: usize,
    fetched_events: usize,
    threshold: u64,
) -> bool {
    let operations = (num_timestamps as u64).saturating_mul(fetched_events as u64);
    if operations <= threshold {
        return false;
    }
    tracing::warn!(
        computer,
        num_timestamps,
        fetched_events,
        operations,
        threshold,
        "windowed fold operations count exceeds the configured threshold; \
         consider narrowing the period or the checking window"
    );
    true
}
