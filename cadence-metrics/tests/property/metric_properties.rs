//! Randomized consistency checks: for arbitrary event histories, a
//! single-timestamp computation must equal the matching point of any
//! batch computation that contains its timestamp.

use chrono::Duration;
use proptest::prelude::*;

use cadence_metrics::{
    ChangeFailureRateComputer, DeploymentFrequencyComputer, LeadTimeComputer, MetricComputer,
    TimeToRestoreComputer,
};
use test_fixtures::MetricsHarness;

/// (offset seconds, passed) deployment descriptions on one change list.
fn arb_deployments() -> impl Strategy<Value = Vec<(i64, bool)>> {
    prop::collection::vec((100..2_000i64, any::<bool>()), 0..12)
}

/// (offset seconds, up) service status descriptions.
fn arb_status_reports() -> impl Strategy<Value = Vec<(i64, bool)>> {
    prop::collection::vec((0..2_000i64, any::<bool>()), 0..12)
}

/// Change lists as (offset seconds, deployment delay) pairs; each change
/// list gets at most one passed deployment, `delay` seconds after it.
fn arb_change_lists() -> impl Strategy<Value = Vec<(i64, Option<i64>)>> {
    prop::collection::vec((0..1_500i64, prop::option::of(1..500i64)), 0..8)
}

fn assert_point_matches<C: MetricComputer>(
    computer: &C,
    base: chrono::DateTime<chrono::Utc>,
    eval_offset: i64,
    step_secs: i64,
) where
    C::Value: PartialEq + std::fmt::Debug,
{
    let timestamp = base + Duration::seconds(eval_offset);
    let single = computer.compute_for_single_timestamp(timestamp).unwrap();

    // Place the timestamp at every index of a 4-point batch.
    for index in 0..4usize {
        let first = timestamp - Duration::seconds(step_secs * index as i64);
        let points = computer
            .compute_for_consecutive_timestamps(first, 4, Duration::seconds(step_secs))
            .unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[index].timestamp, timestamp);
        assert_eq!(
            points[index].value, single,
            "batch point {index} diverged from single computation"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn change_failure_rate_single_equals_batch_point(
        deployments in arb_deployments(),
        eval_offset in 500..2_500i64,
        checking_period in 50..2_000i64,
        step in 50..400i64,
    ) {
        let h = MetricsHarness::new();
        let cl = h.add_change_list(0, 0);
        for (offset, passed) in deployments {
            h.add_deployment(offset, passed, &cl);
        }
        let computer = ChangeFailureRateComputer::new(
            h.store.clone(),
            h.environment.clone(),
            Duration::seconds(checking_period),
        );
        assert_point_matches(&computer, h.base, eval_offset, step);
    }

    #[test]
    fn deployment_frequency_single_equals_batch_point(
        deployments in arb_deployments(),
        eval_offset in 500..2_500i64,
        checking_period in 50..2_000i64,
        step in 50..400i64,
    ) {
        let h = MetricsHarness::new();
        let cl = h.add_change_list(0, 0);
        for (offset, passed) in deployments {
            h.add_deployment(offset, passed, &cl);
        }
        let computer = DeploymentFrequencyComputer::new(
            h.store.clone(),
            h.environment.clone(),
            Duration::seconds(checking_period),
        );
        assert_point_matches(&computer, h.base, eval_offset, step);
    }

    #[test]
    fn time_to_restore_single_equals_batch_point(
        reports in arb_status_reports(),
        eval_offset in 500..2_500i64,
        checking_period in 50..2_000i64,
        step in 50..400i64,
    ) {
        let h = MetricsHarness::new();
        for (offset, up) in reports {
            h.add_service_status(offset, up);
        }
        let computer = TimeToRestoreComputer::new(
            h.store.clone(),
            h.environment.clone(),
            Duration::seconds(checking_period),
        );
        assert_point_matches(&computer, h.base, eval_offset, step);
    }

    #[test]
    fn lead_time_single_equals_batch_point(
        change_lists in arb_change_lists(),
        eval_offset in 500..2_500i64,
        checking_period in 50..2_000i64,
        step in 50..400i64,
    ) {
        let h = MetricsHarness::new();
        for (i, (offset, deployment_delay)) in change_lists.iter().enumerate() {
            let cl = h.add_change_list(i as u32, *offset);
            if let Some(delay) = deployment_delay {
                h.add_deployment(offset + delay, true, &cl);
            }
        }
        let computer = LeadTimeComputer::new(
            h.store.clone(),
            h.environment.clone(),
            Duration::seconds(checking_period),
        );
        assert_point_matches(&computer, h.base, eval_offset, step);
    }

    #[test]
    fn events_exactly_at_the_timestamp_are_invisible(
        offset in 100..1_000i64,
        checking_period in 1..1_000i64,
    ) {
        let h = MetricsHarness::new();
        let cl = h.add_change_list(0, 0);
        h.add_deployment(offset, false, &cl);

        let computer = ChangeFailureRateComputer::new(
            h.store.clone(),
            h.environment.clone(),
            Duration::seconds(checking_period),
        );
        // Exactly at the event: excluded.
        let at_event = computer.compute_for_single_timestamp(h.at(offset)).unwrap();
        prop_assert_eq!(at_event, None);
        // One second later: included (the window start sits at or before
        // the event for any checking period >= 1).
        let after = computer.compute_for_single_timestamp(h.at(offset + 1)).unwrap();
        prop_assert_eq!(after, Some(100.0));
    }
}
