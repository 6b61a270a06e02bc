//! The batch/point duality every metric must satisfy, plus the
//! day-bucketed projection used for charts.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use cadence_core::errors::{CadenceResult, MetricsError};
use cadence_core::models::{DailyDataPoint, MetricDataPoint};

/// Step between consecutive timestamps when the caller has no preference
/// (and the step used for derived single-timestamp computation, where it
/// is irrelevant).
pub fn default_step_length() -> Duration {
    Duration::days(1)
}

/// Seconds of a duration as a float, keeping sub-second precision.
pub(crate) fn duration_seconds_f64(d: Duration) -> f64 {
    match d.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        // Only reachable for spans of hundreds of millennia.
        None => d.num_milliseconds() as f64 / 1e3,
    }
}

/// A windowed metric computer.
///
/// Concrete metrics implement exactly one method:
/// [`compute_for_consecutive_timestamps`](MetricComputer::compute_for_consecutive_timestamps).
/// It must fetch the full set of relevant events once for the whole range
/// and then fold per timestamp, never re-querying per timestamp. Single
/// timestamp evaluation is derived from it; computers may override the
/// derived method with a faster direct query, but the two paths must
/// always agree.
pub trait MetricComputer {
    /// Result type of one data point. Metrics that can lack data use an
    /// `Option`; time-to-restore keeps its historical `0` sentinel and
    /// uses a bare integer.
    type Value;

    /// Computer name used in performance warnings.
    fn label(&self) -> &'static str;

    /// Compute one value per timestamp `first_timestamp + i * step_length`
    /// for `i in 0..num_timestamps`. The result holds exactly
    /// `num_timestamps` points in timestamp order.
    fn compute_for_consecutive_timestamps(
        &self,
        first_timestamp: DateTime<Utc>,
        num_timestamps: usize,
        step_length: Duration,
    ) -> CadenceResult<Vec<MetricDataPoint<Self::Value>>>;

    /// Compute the value as of one timestamp. Derived from the batch
    /// method so the two can never drift apart unless a computer overrides
    /// this with an equivalent fast path.
    fn compute_for_single_timestamp(&self, timestamp: DateTime<Utc>) -> CadenceResult<Self::Value> {
        let mut points =
            self.compute_for_consecutive_timestamps(timestamp, 1, default_step_length())?;
        if points.len() != 1 {
            return Err(MetricsError::DataPointCountMismatch {
                expected: 1,
                actual: points.len(),
            }
            .into());
        }
        match points.pop() {
            Some(point) => Ok(point.value),
            None => Err(MetricsError::DataPointCountMismatch {
                expected: 1,
                actual: 0,
            }
            .into()),
        }
    }

    /// Day-bucketed values for the inclusive calendar range
    /// `[period_start, period_end]`, in the given local-time offset.
    ///
    /// A day's metric is "as of end of day", which is local midnight of
    /// the next day in a half-open window model; each computed point is
    /// then labeled back to its calendar day.
    fn daily_graph_data(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        tz: FixedOffset,
    ) -> CadenceResult<Vec<DailyDataPoint<Self::Value>>> {
        let num_days = (period_end - period_start).num_days() + 1;
        if num_days <= 0 {
            return Ok(Vec::new());
        }

        let first_local = (period_start + Duration::days(1)).and_time(NaiveTime::MIN);
        let first_timestamp = Utc.from_utc_datetime(
            &(first_local - Duration::seconds(tz.local_minus_utc() as i64)),
        );

        let points = self.compute_for_consecutive_timestamps(
            first_timestamp,
            num_days as usize,
            default_step_length(),
        )?;

        Ok(points
            .into_iter()
            .enumerate()
            .map(|(i, point)| {
                DailyDataPoint::new(period_start + Duration::days(i as i64), point.value)
            })
            .collect())
    }
}
