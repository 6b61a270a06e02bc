/// Cadence system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Required length of a change-list commit hash.
pub const COMMIT_HASH_LENGTH: usize = 40;

/// Maximum length of a change list's external id.
pub const CHANGE_LIST_ID_MAX_LENGTH: usize = 100;

/// Maximum length of a change-list title.
pub const TITLE_MAX_LENGTH: usize = 500;

/// Inclusive bounds for coverage report values (percentages).
pub const COVERAGE_VALUE_MIN: f64 = 0.0;
pub const COVERAGE_VALUE_MAX: f64 = 100.0;
