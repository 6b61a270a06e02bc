use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One computed `(timestamp, value)` pair.
///
/// Transient: produced by a metric computer, consumed by serialization or
/// graphing, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataPoint<T> {
    pub timestamp: DateTime<Utc>,
    pub value: T,
}

impl<T> MetricDataPoint<T> {
    pub fn new(timestamp: DateTime<Utc>, value: T) -> Self {
        Self { timestamp, value }
    }
}

/// One day-bucketed `(date, value)` pair as rendered by charts.
///
/// The external JSON contract is `{"date": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDataPoint<T> {
    pub date: NaiveDate,
    pub value: T,
}

impl<T> DailyDataPoint<T> {
    pub fn new(date: NaiveDate, value: T) -> Self {
        Self { date, value }
    }
}
