mod common;

use std::sync::Arc;

use greencast::{ForecastStore, Greencast, format_axis_tick, format_tooltip_date};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Register a connector and build the orchestrator.
    let greencast = Greencast::builder()
        .with_connector(common::get_connector())
        .build()?;

    // 2. One store per chart; it starts from 90 days of history and 4 weeks ahead.
    let store = ForecastStore::new(Arc::new(greencast));
    let outcome = store.refresh().await;
    println!("refresh: {outcome:?}");

    // 3. Print the merged series the way a chart would label it.
    let snap = store.snapshot().await;
    for p in &snap.series {
        let actual = p.historical.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
        let predicted = p.predicted.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
        println!(
            "{:>6}  {:<18}  actual {actual:>6}  predicted {predicted:>6}",
            format_axis_tick(p.date),
            format_tooltip_date(p.date),
        );
    }

    Ok(())
}
