#![doc = include_str!("../README.md")]
use async_trait::async_trait;
use chrono::NaiveDate;
use greencast_core::connector::{ForecastProvider, GreencastConnector, HistoricalSalesProvider};
use greencast_core::{ForecastEnvelope, GreencastError, ParamKind, SalesRecord};

mod dynamic;
pub mod ledger;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};
pub use ledger::{FALLBACK_HISTORY_DAYS, Order, OrderStatus, SalesLedger};

/// Seed for the demo ledger behind [`MockConnector::new`].
const DEMO_SEED: u64 = 0x6772_6565_6e;

/// Mock connector for CI-safe examples. Serves deterministic data from an
/// in-memory [`SalesLedger`] as of a fixed "today".
pub struct MockConnector {
    ledger: SalesLedger,
    today: NaiveDate,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Demo ledger with a year of orders ending on 2024-06-30.
    #[must_use]
    pub fn new() -> Self {
        let today = Self::demo_today();
        Self::with_ledger(SalesLedger::demo(today, 365, DEMO_SEED), today)
    }

    /// Serve `ledger` as if the current date were `today`.
    #[must_use]
    pub const fn with_ledger(ledger: SalesLedger, today: NaiveDate) -> Self {
        Self { ledger, today }
    }

    /// The fixed date the demo ledger ends on.
    #[must_use]
    pub fn demo_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or(NaiveDate::MIN)
    }

    /// The date this connector treats as today.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    fn check_window(kind: ParamKind, value: u32) -> Result<(), GreencastError> {
        if !kind.accepts(value) {
            return Err(GreencastError::InvalidArg(format!(
                "{kind} must be within {}..={}, got {value}",
                kind.min(),
                kind.max(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl GreencastConnector for MockConnector {
    fn name(&self) -> &'static str {
        "greencast-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_historical_sales_provider(&self) -> Option<&dyn HistoricalSalesProvider> {
        Some(self as &dyn HistoricalSalesProvider)
    }
    fn as_forecast_provider(&self) -> Option<&dyn ForecastProvider> {
        Some(self as &dyn ForecastProvider)
    }
}

#[async_trait]
impl HistoricalSalesProvider for MockConnector {
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError> {
        Self::check_window(ParamKind::HistoryDays, days)?;
        Ok(self.ledger.daily_sales(days, self.today))
    }
}

#[async_trait]
impl ForecastProvider for MockConnector {
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
        Self::check_window(ParamKind::ForecastWeeks, weeks)?;
        Ok(self.ledger.forecast_fallback(weeks, self.today))
    }
}
