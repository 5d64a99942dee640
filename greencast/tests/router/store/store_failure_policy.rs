use std::sync::Arc;

use greencast::{
    ForecastStore, Greencast, GreencastError, RefreshFailurePolicy, RefreshOutcome, RefreshStatus,
};
use greencast_mock::{DynamicMockConnector, DynamicMockController, MockBehavior};

use crate::helpers::{SCENARIO_F, SCENARIO_H, forecast, sales};

async fn store(policy: RefreshFailurePolicy) -> (ForecastStore, DynamicMockController) {
    let (dm, ctl) = DynamicMockConnector::new_with_controller("dm");
    ctl.set_default_historical_behavior(MockBehavior::Return(sales(SCENARIO_H)))
        .await;
    ctl.set_default_forecast_behavior(MockBehavior::Return(forecast(SCENARIO_F)))
        .await;
    let gc = Greencast::builder()
        .with_connector(dm)
        .failure_policy(policy)
        .build()
        .unwrap();
    (ForecastStore::new(Arc::new(gc)), ctl)
}

fn outage() -> GreencastError {
    GreencastError::connector("dm", "server error 502")
}

#[tokio::test]
async fn reset_both_clears_last_good_series_on_failure() {
    let (store, ctl) = store(RefreshFailurePolicy::ResetBoth).await;
    assert_eq!(store.refresh().await, RefreshOutcome::Applied);
    assert_eq!(store.snapshot().await.series.len(), 3);

    ctl.set_default_forecast_behavior(MockBehavior::Fail(outage()))
        .await;
    assert_eq!(store.refresh().await, RefreshOutcome::Failed(outage()));

    let snap = store.snapshot().await;
    assert!(snap.series.is_empty());
    assert_eq!(snap.status, RefreshStatus::Failed(outage()));
}

#[tokio::test]
async fn keep_succeeded_publishes_the_other_side() {
    let (store, ctl) = store(RefreshFailurePolicy::KeepSucceeded).await;
    ctl.set_default_historical_behavior(MockBehavior::Fail(outage()))
        .await;

    assert_eq!(store.refresh().await, RefreshOutcome::Partial(outage()));

    let snap = store.snapshot().await;
    assert_eq!(snap.status, RefreshStatus::Partial(outage()));
    assert!(snap.series.iter().all(|p| p.historical.is_none()));
    assert_eq!(snap.series.len(), 2);
}

#[tokio::test]
async fn recovery_after_failure_returns_to_ready() {
    let (store, ctl) = store(RefreshFailurePolicy::ResetBoth).await;
    ctl.set_default_historical_behavior(MockBehavior::Fail(outage()))
        .await;
    assert!(matches!(store.refresh().await, RefreshOutcome::Failed(_)));

    ctl.set_default_historical_behavior(MockBehavior::Return(sales(SCENARIO_H)))
        .await;
    assert_eq!(store.refresh().await, RefreshOutcome::Applied);
    assert_eq!(store.snapshot().await.status, RefreshStatus::Ready);
}
