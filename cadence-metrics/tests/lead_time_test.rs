use chrono::Duration;

use cadence_metrics::{LeadTimeComputer, MetricComputer};
use test_fixtures::MetricsHarness;

fn computer(h: &MetricsHarness, checking_period_secs: i64) -> LeadTimeComputer {
    LeadTimeComputer::new(
        h.store.clone(),
        h.environment.clone(),
        Duration::seconds(checking_period_secs),
    )
}

#[test]
fn lead_time_is_the_diff_from_change_list_to_its_first_passed_deployment() {
    let h = MetricsHarness::new();
    let cl = h.add_change_list(0, 100);
    h.add_deployment(150, true, &cl);

    let value = computer(&h, 200)
        .compute_for_single_timestamp(h.at(200))
        .unwrap();
    assert_eq!(value, Some(50));
}

#[test]
fn change_lists_out_of_checking_period_do_not_affect_lead_time() {
    let h = MetricsHarness::new();
    let cl0 = h.add_change_list(0, 10);
    let cl1 = h.add_change_list(1, 110);
    h.add_deployment(150, true, &cl0);
    h.add_deployment(160, true, &cl1);

    let value = computer(&h, 150)
        .compute_for_single_timestamp(h.at(200))
        .unwrap();
    assert_eq!(value, Some(50));
}

#[test]
fn deployments_out_of_checking_period_do_not_affect_lead_time() {
    let h = MetricsHarness::new();
    let cl0 = h.add_change_list(0, 10);
    let cl1 = h.add_change_list(1, 110);
    h.add_deployment(150, true, &cl0);
    h.add_deployment(160, true, &cl1);

    let value = computer(&h, 155)
        .compute_for_single_timestamp(h.at(155))
        .unwrap();
    assert_eq!(value, Some(140));
}

#[test]
fn later_explicit_deployment_is_ignored_when_an_earlier_rollout_covers_the_change_list() {
    // The deployment at 300 rolled forward both change lists; the explicit
    // deployment of the older one at 400 must not stretch its lead time.
    let h = MetricsHarness::new();
    let cl0 = h.add_change_list(0, 100);
    let cl1 = h.add_change_list(1, 200);
    h.add_deployment(300, true, &cl1);
    h.add_deployment(400, true, &cl0);

    let value = computer(&h, 400)
        .compute_for_single_timestamp(h.at(500))
        .unwrap();
    assert_eq!(value, Some(150));
}

#[test]
fn failed_deployments_do_not_affect_lead_time() {
    let h = MetricsHarness::new();
    let cl = h.add_change_list(0, 10);
    h.add_deployment(100, false, &cl);
    h.add_deployment(150, true, &cl);

    let value = computer(&h, 200)
        .compute_for_single_timestamp(h.at(200))
        .unwrap();
    assert_eq!(value, Some(140));
}

#[test]
fn change_lists_of_other_projects_do_not_affect_lead_time() {
    let h = MetricsHarness::new();
    h.add_change_list_for(2, 0, 100);
    let own = h.add_change_list(1, 200);
    h.add_deployment(300, true, &own);

    let value = computer(&h, 600)
        .compute_for_single_timestamp(h.at(600))
        .unwrap();
    assert_eq!(value, Some(100));
}

#[test]
fn change_lists_without_any_later_deployment_are_skipped() {
    // A change list newer than every passed deployment has no rollout
    // bound yet and must not enter the average.
    let h = MetricsHarness::new();
    let cl0 = h.add_change_list(0, 100);
    h.add_change_list(1, 300);
    h.add_deployment(200, true, &cl0);

    let value = computer(&h, 400)
        .compute_for_single_timestamp(h.at(400))
        .unwrap();
    assert_eq!(value, Some(100));
}

#[test]
fn lead_time_is_none_when_no_data_exists() {
    let h = MetricsHarness::new();
    let value = computer(&h, 200)
        .compute_for_single_timestamp(h.at(200))
        .unwrap();
    assert_eq!(value, None);
}
