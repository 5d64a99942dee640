use async_trait::async_trait;

use crate::GreencastError;
pub use greencast_types::ConnectorKey;
use greencast_types::{ForecastEnvelope, SalesRecord};

/// Focused role trait for connectors that provide historical sales actuals.
#[async_trait]
pub trait HistoricalSalesProvider: Send + Sync {
    /// Fetch per-day sales for the trailing `days` days.
    ///
    /// Rows are returned as the backend sent them: dates unparsed, order not
    /// guaranteed, malformed rows included.
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError>;
}

/// Focused role trait for connectors that provide predicted demand.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch predictions covering the next `weeks` weeks.
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait GreencastConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "greencast-http", "greencast-mock").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise historical sales capability when supported.
    fn as_historical_sales_provider(&self) -> Option<&dyn HistoricalSalesProvider> {
        None
    }

    /// Advertise forecast capability when supported.
    fn as_forecast_provider(&self) -> Option<&dyn ForecastProvider> {
        None
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `GreencastConnector` by delegating to an inner field.
///
/// The wrapper must itself implement every role trait; an accessor returns the
/// wrapper only when the inner connector advertises the capability.
#[macro_export]
macro_rules! greencast_connector_accessors {
    ($inner:ident) => {
        fn as_historical_sales_provider(
            &self,
        ) -> Option<&dyn $crate::connector::HistoricalSalesProvider> {
            if self.$inner.as_historical_sales_provider().is_some() {
                Some(self as &dyn $crate::connector::HistoricalSalesProvider)
            } else {
                None
            }
        }
        fn as_forecast_provider(&self) -> Option<&dyn $crate::connector::ForecastProvider> {
            if self.$inner.as_forecast_provider().is_some() {
                Some(self as &dyn $crate::connector::ForecastProvider)
            } else {
                None
            }
        }
    };
}
