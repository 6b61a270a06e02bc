use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time interval `[start, end)`, optionally unbounded below.
///
/// This is the only window shape the engine uses: events at `start` are
/// included, events at `end` are excluded. Coverage computers with no
/// checking period use the unbounded form `(-inf, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// A bounded window `[start, end)`.
    pub fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    /// An unbounded-below window `(-inf, end)`.
    pub fn up_to(end: DateTime<Utc>) -> Self {
        Self { start: None, end }
    }

    /// Whether `t` falls inside the window.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        match self.start {
            Some(start) => start <= t && t < self.end,
            None => t < self.end,
        }
    }
}
