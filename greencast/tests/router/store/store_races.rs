use std::sync::Arc;
use std::time::Duration;

use greencast::{
    ForecastStore, Greencast, QueryParameters, Reconciled, RefreshOutcome, RefreshStatus,
};
use greencast_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{forecast, m_series, sales};

fn reconciled(points: usize) -> Reconciled {
    let series = (1..=points)
        .map(|i| {
            greencast::CombinedPoint::historical(
                chrono::NaiveDate::from_ymd_opt(2024, 1, u32::try_from(i).unwrap()).unwrap(),
                1.0,
            )
        })
        .collect();
    Reconciled {
        series,
        error: None,
        partial: false,
        dropped: 0,
    }
}

fn idle_store() -> ForecastStore {
    let gc = Greencast::builder()
        .with_connector(m_series("m", &[], &[]))
        .build()
        .unwrap();
    ForecastStore::new(Arc::new(gc))
}

#[tokio::test(start_paused = true)]
async fn slow_refresh_for_old_params_never_overwrites_newer_result() {
    let (dm, ctl) = DynamicMockConnector::new_with_controller("dm");
    ctl.set_default_historical_behavior(MockBehavior::Return(sales(&[("2024-01-01", 5.0)])))
        .await;
    ctl.set_forecast_behavior(
        4,
        MockBehavior::Delay(
            Duration::from_secs(10),
            forecast(&[("2024-01-10", 4.0)]),
        ),
    )
    .await;
    ctl.set_forecast_behavior(8, MockBehavior::Return(forecast(&[("2024-01-20", 8.0)])))
        .await;

    let gc = Greencast::builder().with_connector(dm).build().unwrap();
    let store = Arc::new(ForecastStore::new(Arc::new(gc)));

    let slow = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(store.set_forecast_weeks("8").await, RefreshOutcome::Applied);
    assert_eq!(slow.await.unwrap(), RefreshOutcome::Superseded);

    let snap = store.snapshot().await;
    assert_eq!(snap.params.forecast_weeks(), 8);
    assert_eq!(snap.status, RefreshStatus::Ready);
    assert_eq!(snap.generation, Some(2));
    let predicted: Vec<f64> = snap.series.iter().filter_map(|p| p.predicted).collect();
    assert_eq!(predicted, vec![8.0]);
}

#[tokio::test]
async fn older_generation_is_discarded_after_newer_one_lands() {
    let store = idle_store();
    let t1 = store.begin_refresh().await;
    let t2 = store.begin_refresh().await;
    assert_eq!(t1.params, t2.params);
    assert!(t2.generation > t1.generation);

    assert_eq!(store.commit(t2, reconciled(2)).await, RefreshOutcome::Applied);
    assert_eq!(store.commit(t1, reconciled(5)).await, RefreshOutcome::Superseded);

    let snap = store.snapshot().await;
    assert_eq!(snap.series.len(), 2);
    assert_eq!(snap.generation, Some(t2.generation));
    assert_eq!(snap.status, RefreshStatus::Ready);
}

#[tokio::test]
async fn earlier_result_lands_but_status_waits_for_latest() {
    let store = idle_store();
    let t1 = store.begin_refresh().await;
    let t2 = store.begin_refresh().await;

    assert_eq!(store.commit(t1, reconciled(1)).await, RefreshOutcome::Applied);
    let snap = store.snapshot().await;
    assert_eq!(snap.series.len(), 1);
    assert_eq!(snap.status, RefreshStatus::Loading);

    assert_eq!(store.commit(t2, reconciled(3)).await, RefreshOutcome::Applied);
    let snap = store.snapshot().await;
    assert_eq!(snap.series.len(), 3);
    assert_eq!(snap.status, RefreshStatus::Ready);
}

#[tokio::test]
async fn token_for_changed_params_is_superseded() {
    let gc = Greencast::builder()
        .with_connector(m_series("m", &[], &[]))
        .build()
        .unwrap();
    let store = ForecastStore::with_params(Arc::new(gc), QueryParameters::new(30, 2).unwrap());
    let stale = store.begin_refresh().await;

    assert_eq!(store.set_history_days("60").await, RefreshOutcome::Applied);
    assert_eq!(
        store.commit(stale, reconciled(4)).await,
        RefreshOutcome::Superseded
    );
    assert!(store.snapshot().await.series.is_empty());
}
