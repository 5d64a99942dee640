use std::time::Duration;

use chrono::NaiveDate;
use greencast::{
    CombinedPoint, Greencast, GreencastError, QueryParameters, RefreshFailurePolicy, SeriesFetch,
};
use greencast_mock::{DynamicMockConnector, MockBehavior, MockCall};

use crate::helpers::{SCENARIO_F, SCENARIO_H, forecast, m_series, sales};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn params(days: u32, weeks: u32) -> QueryParameters {
    QueryParameters::new(days, weeks).unwrap()
}

#[tokio::test]
async fn combined_series_merges_the_scenario() {
    let gc = Greencast::builder()
        .with_connector(m_series("m", SCENARIO_H, SCENARIO_F))
        .build()
        .unwrap();

    let out = gc.combined_series(QueryParameters::default()).await;
    assert_eq!(out.error, None);
    assert_eq!(out.dropped, 0);
    assert_eq!(
        out.series,
        vec![
            CombinedPoint::historical(d(2024, 1, 1), 10.0),
            CombinedPoint {
                date: d(2024, 1, 2),
                historical: Some(20.0),
                predicted: Some(18.0),
            },
            CombinedPoint::predicted(d(2024, 1, 3), 25.0),
        ]
    );
}

#[tokio::test]
async fn fetch_series_issues_both_calls_with_the_params() {
    let (dm, ctl) = DynamicMockConnector::new_with_controller("dm");
    ctl.set_default_historical_behavior(MockBehavior::Return(vec![]))
        .await;
    ctl.set_default_forecast_behavior(MockBehavior::Return(forecast(&[])))
        .await;
    let gc = Greencast::builder().with_connector(dm).build().unwrap();

    let fetched = gc.fetch_series(params(30, 2)).await;
    assert_eq!(fetched.params, params(30, 2));
    assert!(fetched.historical.is_ok() && fetched.forecast.is_ok());

    let mut calls = ctl.calls().await;
    calls.sort_by_key(|c| matches!(c, MockCall::Forecast(_)));
    assert_eq!(calls, vec![MockCall::HistoricalSales(30), MockCall::Forecast(2)]);
}

#[tokio::test]
async fn malformed_records_are_dropped_and_counted() {
    let gc = Greencast::builder()
        .with_connector(m_series(
            "m",
            &[("not-a-date", 5.0), ("2024-01-01", 10.0)],
            &[("2024-01-02", f64::NAN)],
        ))
        .build()
        .unwrap();

    let out = gc.combined_series(QueryParameters::default()).await;
    assert_eq!(out.error, None);
    assert_eq!(out.dropped, 2);
    assert_eq!(out.series, vec![CombinedPoint::historical(d(2024, 1, 1), 10.0)]);
}

#[tokio::test]
async fn empty_sources_give_empty_series() {
    let gc = Greencast::builder()
        .with_connector(m_series("m", &[], &[]))
        .build()
        .unwrap();

    let out = gc.combined_series(QueryParameters::default()).await;
    assert!(out.series.is_empty());
    assert_eq!(out.error, None);
}

#[tokio::test(start_paused = true)]
async fn request_deadline_fails_only_the_unfinished_side() {
    let (dm, ctl) = DynamicMockConnector::new_with_controller("dm");
    ctl.set_default_historical_behavior(MockBehavior::Return(sales(SCENARIO_H)))
        .await;
    ctl.set_default_forecast_behavior(MockBehavior::Hang).await;

    let gc = Greencast::builder()
        .with_connector(dm)
        .provider_timeout(Duration::from_secs(30))
        .request_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let fetched = gc.fetch_series(QueryParameters::default()).await;
    assert_eq!(fetched.historical.unwrap(), sales(SCENARIO_H));
    assert_eq!(
        fetched.forecast.unwrap_err(),
        GreencastError::request_timeout("forecast")
    );
}

fn one_side_failed() -> SeriesFetch {
    SeriesFetch {
        params: QueryParameters::default(),
        historical: Ok(sales(SCENARIO_H)),
        forecast: Err(GreencastError::connector("portal", "server error 500")),
    }
}

#[test]
fn reset_both_discards_the_surviving_side() {
    let out = one_side_failed().reconcile(RefreshFailurePolicy::ResetBoth);
    assert!(out.series.is_empty());
    assert!(!out.partial);
    assert_eq!(
        out.error,
        Some(GreencastError::connector("portal", "server error 500"))
    );
}

#[test]
fn keep_succeeded_publishes_the_surviving_side() {
    let out = one_side_failed().reconcile(RefreshFailurePolicy::KeepSucceeded);
    assert!(out.partial);
    assert_eq!(
        out.series,
        vec![
            CombinedPoint::historical(d(2024, 1, 1), 10.0),
            CombinedPoint::historical(d(2024, 1, 2), 20.0),
        ]
    );
}

#[test]
fn both_sides_failing_aggregates_errors() {
    let h = GreencastError::not_found("historical sales for 90 days");
    let f = GreencastError::request_timeout("forecast");
    let fetched = SeriesFetch {
        params: QueryParameters::default(),
        historical: Err(h.clone()),
        forecast: Err(f.clone()),
    };

    for policy in [RefreshFailurePolicy::ResetBoth, RefreshFailurePolicy::KeepSucceeded] {
        let out = fetched.reconcile(policy);
        assert!(out.series.is_empty());
        assert!(!out.partial);
        assert_eq!(
            out.error,
            Some(GreencastError::AllProvidersFailed(vec![h.clone(), f.clone()]))
        );
    }
}
