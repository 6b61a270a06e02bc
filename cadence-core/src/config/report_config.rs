use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::defaults;

/// Daily-report configuration: request defaults, limits, and the local
/// timezone offset used for calendar-day boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub default_checking_period_days: u32,
    pub default_period_days: u32,
    pub max_period_days: u32,
    /// Offset from UTC in minutes (east positive). Day boundaries are
    /// computed in this offset so charts match user-facing calendar days.
    pub utc_offset_minutes: i32,
}

impl ReportConfig {
    /// The configured offset as a chrono timezone.
    ///
    /// Falls back to UTC if the configured minutes are out of range
    /// (beyond +/- 24h), which only a hand-edited config can produce.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_checking_period_days: defaults::DEFAULT_CHECKING_PERIOD_DAYS,
            default_period_days: defaults::DEFAULT_PERIOD_DAYS,
            max_period_days: defaults::MAX_PERIOD_DAYS,
            utc_offset_minutes: defaults::DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}
