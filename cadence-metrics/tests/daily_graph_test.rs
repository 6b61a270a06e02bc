use chrono::{Duration, FixedOffset, NaiveDate, Offset, Utc};

use cadence_core::events::CoverageKind;
use cadence_metrics::{MetricComputer, OverallCoverageComputer};
use test_fixtures::MetricsHarness;

fn utc() -> FixedOffset {
    Utc.fix()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn overall(h: &MetricsHarness) -> OverallCoverageComputer {
    OverallCoverageComputer::new(h.store.clone(), h.environment.project_id, None)
}

#[test]
fn one_point_per_calendar_day_labeled_with_its_day() {
    let h = MetricsHarness::new();
    // Base is 2000-01-01T00:00:00Z.
    h.add_coverage(CoverageKind::Overall, 50.0, h.base + Duration::hours(10));
    h.add_coverage(
        CoverageKind::Overall,
        70.0,
        h.base + Duration::days(2) + Duration::hours(8),
    );

    let points = overall(&h)
        .daily_graph_data(date(2000, 1, 1), date(2000, 1, 3), utc())
        .unwrap();

    // A day's value is "as of end of day": midnight of the next day.
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].date, date(2000, 1, 1));
    assert_eq!(points[0].value, Some(50.0));
    assert_eq!(points[1].date, date(2000, 1, 2));
    assert_eq!(points[1].value, Some(50.0));
    assert_eq!(points[2].date, date(2000, 1, 3));
    assert_eq!(points[2].value, Some(70.0));
}

#[test]
fn day_boundaries_follow_the_local_offset() {
    let h = MetricsHarness::new();
    // 23:00 UTC on Jan 1 is already Jan 2 in a +02:00 locale.
    h.add_coverage(CoverageKind::Overall, 80.0, h.base + Duration::hours(23));

    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let points = overall(&h)
        .daily_graph_data(date(2000, 1, 1), date(2000, 1, 2), plus_two)
        .unwrap();
    assert_eq!(points[0].value, None);
    assert_eq!(points[1].value, Some(80.0));

    // In UTC the same report still belongs to Jan 1.
    let points = overall(&h)
        .daily_graph_data(date(2000, 1, 1), date(2000, 1, 2), utc())
        .unwrap();
    assert_eq!(points[0].value, Some(80.0));
}

#[test]
fn an_inverted_period_yields_no_points() {
    let h = MetricsHarness::new();
    let points = overall(&h)
        .daily_graph_data(date(2000, 1, 5), date(2000, 1, 1), utc())
        .unwrap();
    assert!(points.is_empty());
}

#[test]
fn daily_points_serialize_to_the_chart_contract() {
    let h = MetricsHarness::new();
    h.add_coverage(CoverageKind::Overall, 42.5, h.base + Duration::hours(1));

    let points = overall(&h)
        .daily_graph_data(date(2000, 1, 1), date(2000, 1, 2), utc())
        .unwrap();
    let json = serde_json::to_value(&points).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"date": "2000-01-01", "value": 42.5},
            {"date": "2000-01-02", "value": 42.5},
        ])
    );
}
