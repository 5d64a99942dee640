#![doc = include_str!("../README.md")]
//! greencast-http
//!
//! Connector for the portal's forecasting REST endpoints
//! (`GET forecast?weeks=` and `GET historical-sales?days=`).
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::{CloneArcAdapters, PortalForecast, PortalSales, RealAdapter};
use async_trait::async_trait;
use greencast_core::connector::{
    ConnectorKey, ForecastProvider, GreencastConnector, HistoricalSalesProvider,
};
use greencast_core::{ForecastEnvelope, GreencastError, SalesRecord};

pub use builder::PortalConnectorBuilder;

/// Public connector type. Production users construct it with
/// [`PortalConnector::with_base_url`] or through [`PortalConnector::builder`].
pub struct PortalConnector {
    sales: Arc<dyn PortalSales>,
    forecast: Arc<dyn PortalForecast>,
}

impl PortalConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("greencast-http");

    /// Connect to the portal API rooted at `base` (e.g. `http://localhost:8000/`).
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base` is not a usable absolute URL.
    pub fn with_base_url(base: &str) -> Result<Self, GreencastError> {
        let a = RealAdapter::try_from_base(base)?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from any adapter bundle (the production one or a test fake).
    pub fn from_adapter<A: CloneArcAdapters + ?Sized>(adapter: &A) -> Self {
        Self {
            sales: adapter.clone_arc_sales(),
            forecast: adapter.clone_arc_forecast(),
        }
    }
}

#[async_trait]
impl HistoricalSalesProvider for PortalConnector {
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError> {
        self.sales.historical_sales(days).await
    }
}

#[async_trait]
impl ForecastProvider for PortalConnector {
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
        self.forecast.forecast(weeks).await
    }
}

#[async_trait]
impl GreencastConnector for PortalConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Microgreen Portal"
    }

    fn as_historical_sales_provider(&self) -> Option<&dyn HistoricalSalesProvider> {
        Some(self as &dyn HistoricalSalesProvider)
    }

    fn as_forecast_provider(&self) -> Option<&dyn ForecastProvider> {
        Some(self as &dyn ForecastProvider)
    }
}
