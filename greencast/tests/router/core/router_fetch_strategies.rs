use std::time::Duration;

use greencast::{FetchStrategy, Greencast, GreencastError};
use greencast_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{MockConnector, forecast, sales};

#[tokio::test]
async fn strategy_latency_returns_fastest_success() {
    let fast_ok = MockConnector::builder()
        .name("fast")
        .delay(Duration::from_millis(10))
        .returns_forecast_ok(forecast(&[("2024-01-01", 11.0)]))
        .build();
    let slow_ok = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(100))
        .returns_forecast_ok(forecast(&[("2024-01-01", 99.0)]))
        .build();

    let gc = Greencast::builder()
        .with_connector(slow_ok)
        .with_connector(fast_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let env = gc.forecast(4).await.unwrap();
    assert_eq!(env.predictions[0].predicted_trays, 11.0);
}

#[tokio::test]
async fn strategy_latency_ignores_faster_failure_and_returns_first_success() {
    let fast_fail = MockConnector::builder()
        .name("fast_fail")
        .delay(Duration::from_millis(5))
        .with_forecast_fn(|_| Err(GreencastError::Other("boom".into())))
        .build();
    let slow_ok = MockConnector::builder()
        .name("slow_ok")
        .delay(Duration::from_millis(20))
        .returns_forecast_ok(forecast(&[("2024-01-01", 77.0)]))
        .build();

    let gc = Greencast::builder()
        .with_connector(fast_fail)
        .with_connector(slow_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let env = gc.forecast(4).await.unwrap();
    assert_eq!(env.predictions[0].predicted_trays, 77.0);
}

#[tokio::test]
async fn priority_falls_back_after_error() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_sales_fn(|_| Err(GreencastError::connector("broken", "server error 503")))
        .build();
    let ok = MockConnector::builder()
        .name("ok")
        .returns_sales_ok(sales(&[("2024-01-01", 3.0)]))
        .build();

    let gc = Greencast::builder()
        .with_connector(broken)
        .with_connector(ok)
        .build()
        .unwrap();

    let rows = gc.historical_sales(30).await.unwrap();
    assert_eq!(rows, sales(&[("2024-01-01", 3.0)]));
}

#[tokio::test]
async fn single_untagged_failure_is_attributed_to_connector() {
    let only = MockConnector::builder()
        .name("only")
        .with_forecast_fn(|_| Err(GreencastError::Data("bad payload".into())))
        .build();

    let gc = Greencast::builder().with_connector(only).build().unwrap();

    let err = gc.forecast(2).await.unwrap_err();
    match err {
        GreencastError::Connector { connector, msg } => {
            assert_eq!(connector, "only");
            assert!(msg.contains("bad payload"), "msg: {msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn all_failures_are_aggregated() {
    let a = MockConnector::builder()
        .name("a")
        .with_forecast_fn(|_| Err(GreencastError::Other("a down".into())))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .with_forecast_fn(|_| Err(GreencastError::Other("b down".into())))
        .build();

    let gc = Greencast::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    match gc.forecast(4).await.unwrap_err() {
        GreencastError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 2);
            assert!(matches!(&errs[0], GreencastError::Connector { connector, .. } if connector == "a"));
            assert!(matches!(&errs[1], GreencastError::Connector { connector, .. } if connector == "b"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn hanging_provider_times_out_and_next_one_answers() {
    let (hung, hung_ctl) = DynamicMockConnector::new_with_controller("hung");
    hung_ctl
        .set_default_forecast_behavior(MockBehavior::Hang)
        .await;
    let ok = MockConnector::builder()
        .name("ok")
        .returns_forecast_ok(forecast(&[("2024-01-05", 4.0)]))
        .build();

    let gc = Greencast::builder()
        .with_connector(hung)
        .with_connector(ok)
        .provider_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let env = gc.forecast(1).await.unwrap();
    assert_eq!(env.predictions.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn all_providers_timing_out_is_reported_per_capability() {
    let (a, a_ctl) = DynamicMockConnector::new_with_controller("a");
    let (b, b_ctl) = DynamicMockConnector::new_with_controller("b");
    a_ctl.set_default_historical_behavior(MockBehavior::Hang).await;
    b_ctl.set_default_historical_behavior(MockBehavior::Hang).await;

    let gc = Greencast::builder()
        .with_connector(a)
        .with_connector(b)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = gc.historical_sales(30).await.unwrap_err();
    assert_eq!(
        err,
        GreencastError::AllProvidersTimedOut {
            capability: "historical-sales"
        }
    );
}

#[tokio::test]
async fn connectors_without_capability_yield_unsupported() {
    let sales_only = MockConnector::builder()
        .name("sales_only")
        .returns_sales_ok(vec![])
        .build();

    let gc = Greencast::builder()
        .with_connector(sales_only)
        .build()
        .unwrap();

    assert_eq!(
        gc.forecast(4).await.unwrap_err(),
        GreencastError::unsupported("forecast")
    );
}

#[tokio::test]
async fn not_found_everywhere_names_the_window() {
    let (a, _a_ctl) = DynamicMockConnector::new_with_controller("a");
    let (b, _b_ctl) = DynamicMockConnector::new_with_controller("b");

    let gc = Greencast::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    assert_eq!(
        gc.forecast(6).await.unwrap_err(),
        GreencastError::not_found("forecast for 6 weeks")
    );
}
