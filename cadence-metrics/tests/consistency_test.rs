//! The central law: for every computer, a single-timestamp computation
//! must equal the corresponding point of any batch that contains it.

mod common;

use chrono::{DateTime, Duration, Utc};

use cadence_metrics::{
    ChangeFailureRateComputer, DeploymentFrequencyComputer, LeadTimeComputer, MetricComputer,
    TimeToRestoreComputer,
};
use common::{check_all_combinations, ApproxEq};
use test_fixtures::MetricsHarness;

/// Seed the mixed scenario shared by the four DORA computers.
fn seed_mixed_scenario(h: &MetricsHarness) {
    let cl = h.add_change_list(0, 100);
    h.add_deployment(150, true, &cl);
    h.add_deployment(160, false, &cl);
    h.add_deployment(170, true, &cl);
    h.add_service_status(180, false);
    h.add_service_status(190, true);
}

fn assert_single_matches_batch_point<C: MetricComputer>(computer: &C, timestamp: DateTime<Utc>)
where
    C::Value: ApproxEq + std::fmt::Debug,
{
    let single = computer.compute_for_single_timestamp(timestamp).unwrap();
    let batch = computer
        .compute_for_consecutive_timestamps(
            timestamp - Duration::seconds(100),
            5,
            Duration::seconds(100),
        )
        .unwrap();
    assert_eq!(batch.len(), 5);
    assert_eq!(batch[1].timestamp, timestamp);
    assert!(
        single.approx_eq(&batch[1].value),
        "single {single:?} differs from batch point {:?}",
        batch[1].value
    );
}

#[test]
fn single_computation_is_consistent_with_consecutive_computation() {
    let h = MetricsHarness::new();
    seed_mixed_scenario(&h);

    let timestamp = h.at(200);
    let checking_period = Duration::seconds(400);

    assert_single_matches_batch_point(
        &ChangeFailureRateComputer::new(h.store.clone(), h.environment.clone(), checking_period),
        timestamp,
    );
    assert_single_matches_batch_point(
        &DeploymentFrequencyComputer::new(h.store.clone(), h.environment.clone(), checking_period),
        timestamp,
    );
    assert_single_matches_batch_point(
        &TimeToRestoreComputer::new(h.store.clone(), h.environment.clone(), checking_period),
        timestamp,
    );
    assert_single_matches_batch_point(
        &LeadTimeComputer::new(h.store.clone(), h.environment.clone(), checking_period),
        timestamp,
    );
}

#[test]
fn change_failure_rate_holds_for_every_sub_range() {
    let h = MetricsHarness::new();
    let cl = h.add_change_list(0, 50);
    h.add_deployment(150, true, &cl);
    h.add_deployment(160, false, &cl);
    h.add_deployment(170, true, &cl);
    h.add_deployment(250, true, &cl);

    let computer =
        ChangeFailureRateComputer::new(h.store.clone(), h.environment.clone(), Duration::seconds(200));
    check_all_combinations(
        &computer,
        h.at(100),
        Duration::seconds(100),
        &[
            None,
            Some(100.0 / 3.0),
            Some(25.0),
            Some(0.0),
            None,
        ],
    );
}

#[test]
fn deployment_frequency_holds_for_every_sub_range() {
    let h = MetricsHarness::new();
    let cl = h.add_change_list(0, 50);
    h.add_deployment(150, true, &cl);
    h.add_deployment(170, true, &cl);
    h.add_deployment(250, true, &cl);

    let computer = DeploymentFrequencyComputer::new(
        h.store.clone(),
        h.environment.clone(),
        Duration::seconds(200),
    );
    check_all_combinations(
        &computer,
        h.at(100),
        Duration::seconds(100),
        &[None, Some(20.0), Some(50.0), None, None],
    );
}

#[test]
fn lead_time_holds_for_every_sub_range() {
    let h = MetricsHarness::new();
    let cl0 = h.add_change_list(0, 100);
    let cl1 = h.add_change_list(1, 180);
    h.add_deployment(150, true, &cl0);
    h.add_deployment(160, false, &cl0);
    h.add_deployment(250, true, &cl1);

    let computer =
        LeadTimeComputer::new(h.store.clone(), h.environment.clone(), Duration::seconds(200));
    check_all_combinations(
        &computer,
        h.at(100),
        Duration::seconds(100),
        &[None, Some(50), Some(60), None, None],
    );
}

#[test]
fn time_to_restore_holds_for_every_sub_range() {
    let h = MetricsHarness::new();
    h.add_service_status(120, false);
    h.add_service_status(140, true);
    h.add_service_status(220, false);
    h.add_service_status(280, true);

    let computer = TimeToRestoreComputer::new(
        h.store.clone(),
        h.environment.clone(),
        Duration::seconds(200),
    );
    check_all_combinations(
        &computer,
        h.at(100),
        Duration::seconds(100),
        &[0, 20, 40, 60, 0],
    );
}

#[test]
fn window_boundaries_are_half_open() {
    // An event exactly at the evaluated timestamp is excluded; an event
    // exactly at timestamp - checking_period is included.
    let h = MetricsHarness::new();
    let cl = h.add_change_list(0, 0);
    h.add_deployment(100, false, &cl);
    h.add_deployment(300, false, &cl);

    let computer = |cp: i64| {
        ChangeFailureRateComputer::new(h.store.clone(), h.environment.clone(), Duration::seconds(cp))
    };

    // At t=300 the deployment at 300 is outside, the one at 100 inside.
    assert_eq!(
        computer(200).compute_for_single_timestamp(h.at(300)).unwrap(),
        Some(100.0)
    );
    // At t=100 with cp=100 the window is [0, 100): both deployments out.
    assert_eq!(
        computer(100).compute_for_single_timestamp(h.at(100)).unwrap(),
        None
    );
    // At t=301 the deployment at 300 has become visible.
    assert_eq!(
        computer(1).compute_for_single_timestamp(h.at(301)).unwrap(),
        Some(100.0)
    );
}
