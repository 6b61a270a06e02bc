use chrono::Duration;

use cadence_metrics::{MetricComputer, TimeToRestoreComputer};
use test_fixtures::MetricsHarness;

fn computer(h: &MetricsHarness, checking_period_secs: i64) -> TimeToRestoreComputer {
    TimeToRestoreComputer::new(
        h.store.clone(),
        h.environment.clone(),
        Duration::seconds(checking_period_secs),
    )
}

#[test]
fn restore_time_is_the_diff_from_down_report_to_up_report() {
    let h = MetricsHarness::new();
    h.add_service_status(100, false);
    h.add_service_status(150, true);

    let value = computer(&h, 200)
        .compute_for_single_timestamp(h.at(200))
        .unwrap();
    assert_eq!(value, 50);
}

#[test]
fn an_outage_still_open_at_the_window_end_is_not_counted() {
    let h = MetricsHarness::new();
    h.add_service_status(200, false);
    h.add_service_status(220, true);
    h.add_service_status(450, false);

    let value = computer(&h, 400)
        .compute_for_single_timestamp(h.at(500))
        .unwrap();
    assert_eq!(value, 20);
}

#[test]
fn repeated_down_reports_do_not_reopen_the_outage() {
    let h = MetricsHarness::new();
    h.add_service_status(230, false);
    h.add_service_status(250, false);
    h.add_service_status(270, false);
    h.add_service_status(360, true);

    let value = computer(&h, 400)
        .compute_for_single_timestamp(h.at(500))
        .unwrap();
    assert_eq!(value, 130);
}

#[test]
fn repeated_up_reports_after_recovery_are_no_ops() {
    let h = MetricsHarness::new();
    h.add_service_status(150, false);
    h.add_service_status(170, true);
    h.add_service_status(220, true);

    let value = computer(&h, 500)
        .compute_for_single_timestamp(h.at(500))
        .unwrap();
    assert_eq!(value, 20);
}

#[test]
fn up_reports_without_a_preceding_down_are_ignored() {
    let h = MetricsHarness::new();
    h.add_service_status(100, true);
    h.add_service_status(200, false);
    h.add_service_status(260, true);

    let value = computer(&h, 400)
        .compute_for_single_timestamp(h.at(400))
        .unwrap();
    assert_eq!(value, 60);
}

#[test]
fn restore_time_is_zero_when_no_report_exists() {
    // The historical no-data sentinel of this metric is 0, not an absent
    // value, unlike the other three DORA metrics.
    let h = MetricsHarness::new();
    let value = computer(&h, 10)
        .compute_for_single_timestamp(h.at(10))
        .unwrap();
    assert_eq!(value, 0);
}

#[test]
fn multiple_outages_average() {
    let h = MetricsHarness::new();
    h.add_service_status(100, false);
    h.add_service_status(120, true);
    h.add_service_status(200, false);
    h.add_service_status(260, true);

    let value = computer(&h, 400)
        .compute_for_single_timestamp(h.at(400))
        .unwrap();
    assert_eq!(value, 40);
}
