#![allow(dead_code)]

//! Helpers shared by the computer test suites.

use std::fmt::Debug;

use chrono::{DateTime, Duration, Utc};

use cadence_metrics::MetricComputer;

/// Approximate equality, tolerant of float noise in store-side aggregates.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        let scale = self.abs().max(other.abs());
        (self - other).abs() <= 1e-9 + scale * 1e-5
    }
}

impl ApproxEq for i64 {
    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: ApproxEq> ApproxEq for Option<T> {
    fn approx_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.approx_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Verify a computer against expected values for consecutive timestamps:
/// every single timestamp, and every contiguous sub-range `[i..=j]` of the
/// batch, must reproduce the expected values exactly.
pub fn check_all_combinations<C: MetricComputer>(
    computer: &C,
    first_timestamp: DateTime<Utc>,
    step_length: Duration,
    expected: &[C::Value],
) where
    C::Value: ApproxEq + Debug,
{
    let timestamps: Vec<DateTime<Utc>> = (0..expected.len())
        .map(|i| first_timestamp + step_length * (i as i32))
        .collect();

    for (i, timestamp) in timestamps.iter().enumerate() {
        let value = computer
            .compute_for_single_timestamp(*timestamp)
            .expect("single computation");
        assert!(
            value.approx_eq(&expected[i]),
            "single timestamp {i}: computed {value:?}, expected {:?}",
            expected[i]
        );
    }

    for j in 0..expected.len() {
        for i in 0..=j {
            let points = computer
                .compute_for_consecutive_timestamps(timestamps[i], j - i + 1, step_length)
                .expect("batch computation");
            assert_eq!(points.len(), j - i + 1, "batch [{i}..={j}] length");
            for (k, point) in points.iter().enumerate() {
                assert_eq!(point.timestamp, timestamps[i + k], "batch [{i}..={j}] timestamp {k}");
                assert!(
                    point.value.approx_eq(&expected[i + k]),
                    "batch [{i}..={j}] at {k}: computed {:?}, expected {:?}",
                    point.value,
                    expected[i + k]
                );
            }
        }
    }
}
