use greencast::{ConnectorKey, Greencast, GreencastError};

use crate::helpers::{dyn_conn, m_series};

#[tokio::test]
async fn registration_order_is_default_priority() {
    let first = m_series("first", &[("2024-01-01", 1.0)], &[]);
    let second = m_series("second", &[("2024-01-01", 2.0)], &[]);

    let gc = Greencast::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();

    let rows = gc.historical_sales(30).await.unwrap();
    assert_eq!(rows[0].total_trays_sold, 1.0);
}

#[tokio::test]
async fn prefer_reorders_providers() {
    let low = m_series("low", &[("2024-01-01", 1.0)], &[]);
    let high = m_series("high", &[("2024-01-01", 2.0)], &[]);

    let gc = Greencast::builder()
        .with_connector(low.clone())
        .with_connector(high.clone())
        .prefer(&[dyn_conn(&high), dyn_conn(&low)])
        .build()
        .unwrap();

    let rows = gc.historical_sales(30).await.unwrap();
    assert_eq!(rows[0].total_trays_sold, 2.0);
}

#[tokio::test]
async fn prefer_keys_puts_listed_first_and_keeps_the_rest() {
    let a = m_series("a", &[("2024-01-01", 1.0)], &[]);
    let b = m_series("b", &[("2024-01-01", 2.0)], &[]);
    let c = m_series("c", &[("2024-01-01", 3.0)], &[]);

    let gc = Greencast::builder()
        .with_connector(a)
        .with_connector(b)
        .with_connector(c)
        .prefer_keys(&[ConnectorKey::new("c")])
        .build()
        .unwrap();

    let rows = gc.historical_sales(30).await.unwrap();
    assert_eq!(rows[0].total_trays_sold, 3.0);
}

#[test]
fn build_drops_unknown_and_repeated_priority_names() {
    let a = m_series("a", &[], &[]);
    let b = m_series("b", &[], &[]);

    let gc = Greencast::builder()
        .with_connector(a)
        .with_connector(b)
        .prefer_keys(&[
            ConnectorKey::new("b"),
            ConnectorKey::new("ghost"),
            ConnectorKey::new("b"),
            ConnectorKey::new("a"),
        ])
        .build()
        .unwrap();

    assert_eq!(gc.config().provider_priority, vec!["b", "a"]);
}

#[test]
fn build_without_connectors_is_invalid() {
    let err = Greencast::builder().build().err().unwrap();
    assert!(matches!(err, GreencastError::InvalidArg(_)));
}
