//! Default values shared by config structs and report validation.

/// Default sliding lookback window for metric evaluation (2 months).
pub const DEFAULT_CHECKING_PERIOD_DAYS: u32 = 62;

/// Default chart lookback when no start date is given (6 months).
pub const DEFAULT_PERIOD_DAYS: u32 = 186;

/// Maximum chart period a caller may request (6 months).
pub const MAX_PERIOD_DAYS: u32 = 186;

/// Operations count (`num_timestamps * fetched_events`) above which a
/// computation logs a performance warning.
pub const DEFAULT_COMPUTE_OPERATIONS_THRESHOLD: u64 = 100_000_000;

/// Local-time offset from UTC used for calendar-day boundaries.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 0;
