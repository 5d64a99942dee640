use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use greencast_core::connector::{ForecastProvider, GreencastConnector, HistoricalSalesProvider};
use greencast_core::{ForecastEnvelope, GreencastError, SalesRecord};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(GreencastError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
    /// Sleep on the tokio clock, then return the value.
    Delay(Duration, T),
}

/// A call the dynamic mock received, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// `historical_sales(days)`.
    HistoricalSales(u32),
    /// `forecast(weeks)`.
    Forecast(u32),
}

struct Rules<T> {
    by_arg: HashMap<u32, MockBehavior<T>>,
    fallback: Option<MockBehavior<T>>,
}

impl<T: Clone> Rules<T> {
    fn lookup(&self, arg: u32) -> Option<MockBehavior<T>> {
        self.by_arg
            .get(&arg)
            .or(self.fallback.as_ref())
            .cloned()
    }

    fn clear(&mut self) {
        self.by_arg.clear();
        self.fallback = None;
    }
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self {
            by_arg: HashMap::new(),
            fallback: None,
        }
    }
}

#[derive(Default)]
struct InternalState {
    historical_rules: Rules<Vec<SalesRecord>>,
    forecast_rules: Rules<ForecastEnvelope>,
    calls: Vec<MockCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `historical_sales` calls with exactly `days`.
    pub async fn set_historical_behavior(
        &self,
        days: u32,
        behavior: MockBehavior<Vec<SalesRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.historical_rules.by_arg.insert(days, behavior);
    }

    /// Set the behavior for `historical_sales` calls with no per-argument rule.
    pub async fn set_default_historical_behavior(&self, behavior: MockBehavior<Vec<SalesRecord>>) {
        let mut guard = self.state.lock().await;
        guard.historical_rules.fallback = Some(behavior);
    }

    /// Set the behavior for `forecast` calls with exactly `weeks`.
    pub async fn set_forecast_behavior(&self, weeks: u32, behavior: MockBehavior<ForecastEnvelope>) {
        let mut guard = self.state.lock().await;
        guard.forecast_rules.by_arg.insert(weeks, behavior);
    }

    /// Set the behavior for `forecast` calls with no per-argument rule.
    pub async fn set_default_forecast_behavior(&self, behavior: MockBehavior<ForecastEnvelope>) {
        let mut guard = self.state.lock().await;
        guard.forecast_rules.fallback = Some(behavior);
    }

    /// Calls received so far, in arrival order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.historical_rules.clear();
        guard.forecast_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn GreencastConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn GreencastConnector>, controller)
    }
}

async fn play<T>(behavior: Option<MockBehavior<T>>, missing: String) -> Result<T, GreencastError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        Some(MockBehavior::Delay(wait, v)) => {
            tokio::time::sleep(wait).await;
            Ok(v)
        }
        None => Err(GreencastError::not_found(missing)),
    }
}

#[async_trait]
impl GreencastConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_historical_sales_provider(&self) -> Option<&dyn HistoricalSalesProvider> {
        Some(self as &dyn HistoricalSalesProvider)
    }

    fn as_forecast_provider(&self) -> Option<&dyn ForecastProvider> {
        Some(self as &dyn ForecastProvider)
    }
}

#[async_trait]
impl HistoricalSalesProvider for DynamicMockConnector {
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError> {
        // Snapshot the rule without holding the lock across the await below
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(MockCall::HistoricalSales(days));
            guard.historical_rules.lookup(days)
        };
        play(behavior, format!("historical sales for {days} days")).await
    }
}

#[async_trait]
impl ForecastProvider for DynamicMockConnector {
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(MockCall::Forecast(weeks));
            guard.forecast_rules.lookup(weeks)
        };
        play(behavior, format!("forecast for {weeks} weeks")).await
    }
}
