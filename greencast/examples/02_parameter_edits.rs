mod common;

use std::sync::Arc;

use greencast::{ForecastStore, Greencast, RefreshFailurePolicy, RefreshOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let greencast = Greencast::builder()
        .with_connector(common::get_connector())
        .failure_policy(RefreshFailurePolicy::KeepSucceeded)
        .build()?;
    let store = ForecastStore::new(Arc::new(greencast));

    // Out-of-range or non-numeric input leaves the parameters alone and fetches nothing.
    for raw in ["13", "zero", "0", "4.5"] {
        let outcome = store.set_forecast_weeks(raw).await;
        println!("forecast weeks {raw:?}: {outcome:?}");
    }

    // Accepted edits refresh immediately.
    for raw in ["8", "12"] {
        match store.set_forecast_weeks(raw).await {
            RefreshOutcome::Applied => {
                let snap = store.snapshot().await;
                println!(
                    "forecast weeks {raw}: {} points (generation {:?})",
                    snap.series.len(),
                    snap.generation
                );
            }
            other => println!("forecast weeks {raw}: {other:?}"),
        }
    }

    let outcome = store.set_history_days("30").await;
    println!("history days 30: {outcome:?}; params now {:?}", store.params().await);

    Ok(())
}
