#![allow(dead_code)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_const_for_fn)]

use std::sync::Arc;

use async_trait::async_trait;
use greencast_core::connector::{ForecastProvider, HistoricalSalesProvider};
use greencast_core::{ForecastEnvelope, GreencastConnector, GreencastError, SalesRecord};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
///
/// Each capability is present only if a closure (or canned value) was set for it.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub sales_fn:
        Option<Arc<dyn Fn(u32) -> Result<Vec<SalesRecord>, GreencastError> + Send + Sync>>,
    pub forecast_fn:
        Option<Arc<dyn Fn(u32) -> Result<ForecastEnvelope, GreencastError> + Send + Sync>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            delay_ms: 0,
            sales_fn: None,
            forecast_fn: None,
        }
    }
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder {
            inner: Self::default(),
        }
    }

    async fn pause(&self) {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

pub struct MockConnectorBuilder {
    inner: MockConnector,
}

impl MockConnectorBuilder {
    pub fn name(mut self, name: &'static str) -> Self {
        self.inner.name = name;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.inner.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_sales_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Result<Vec<SalesRecord>, GreencastError> + Send + Sync + 'static,
    {
        self.inner.sales_fn = Some(Arc::new(f));
        self
    }

    pub fn with_forecast_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> Result<ForecastEnvelope, GreencastError> + Send + Sync + 'static,
    {
        self.inner.forecast_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_sales_ok(self, rows: Vec<SalesRecord>) -> Self {
        self.with_sales_fn(move |_| Ok(rows.clone()))
    }

    pub fn returns_forecast_ok(self, env: ForecastEnvelope) -> Self {
        self.with_forecast_fn(move |_| Ok(env.clone()))
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(self.inner)
    }
}

#[async_trait]
impl HistoricalSalesProvider for MockConnector {
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError> {
        self.pause().await;
        match &self.sales_fn {
            Some(f) => f(days),
            None => Err(GreencastError::unsupported("historical-sales")),
        }
    }
}

#[async_trait]
impl ForecastProvider for MockConnector {
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
        self.pause().await;
        match &self.forecast_fn {
            Some(f) => f(weeks),
            None => Err(GreencastError::unsupported("forecast")),
        }
    }
}

#[async_trait]
impl GreencastConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_historical_sales_provider(&self) -> Option<&dyn HistoricalSalesProvider> {
        self.sales_fn
            .as_ref()
            .map(|_| self as &dyn HistoricalSalesProvider)
    }

    fn as_forecast_provider(&self) -> Option<&dyn ForecastProvider> {
        self.forecast_fn
            .as_ref()
            .map(|_| self as &dyn ForecastProvider)
    }
}
