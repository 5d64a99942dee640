use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use greencast_core::connector::{ForecastProvider, GreencastConnector, HistoricalSalesProvider};
use greencast_core::{
    CacheConfig, Capability, ForecastEnvelope, GreencastError, SalesRecord,
    greencast_connector_accessors,
};
use moka::future::Cache;

/// Source of "today" for forecast cache keys.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A forecast is regenerated once per calendar day, so the start date is part
/// of its identity alongside the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ForecastKey {
    period_start: NaiveDate,
    weeks: u32,
}

#[async_trait]
trait CacheStore<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V);
}

struct TtlStore<K, V> {
    inner: Cache<K, V>,
}

impl<K, V> TtlStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity.max(1))
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for TtlStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }
    async fn put(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
    clock: Clock,
}

impl CacheMiddleware {
    /// Cache with forecast keys dated by the UTC calendar day.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        Self {
            cfg,
            clock: Arc::new(utc_today),
        }
    }

    /// Cache with a caller-supplied notion of today.
    #[must_use]
    pub fn with_clock(cfg: CacheConfig, clock: Clock) -> Self {
        Self { cfg, clock }
    }
}

impl greencast_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn GreencastConnector>) -> Arc<dyn GreencastConnector> {
        let Self { cfg, clock } = *self;
        Arc::new(CachingConnector::new(inner, &cfg, clock))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "forecast_ttl_ms": self.cfg.forecast_ttl_ms,
            "historical_ttl_ms": self.cfg.historical_ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

// Per-capability typed stores; `None` means disabled (TTL=0).
struct Stores {
    historical: Option<Arc<dyn CacheStore<u32, Arc<Vec<SalesRecord>>>>>,
    forecast: Option<Arc<dyn CacheStore<ForecastKey, Arc<ForecastEnvelope>>>>,
}

/// Connector wrapper that memoizes successful responses of its inner connector.
///
/// Errors are never cached.
pub struct CachingConnector {
    inner: Arc<dyn GreencastConnector>,
    stores: Stores,
    clock: Clock,
}

impl CachingConnector {
    fn maybe_store<K, V>(cfg: &CacheConfig, cap: Capability) -> Option<Arc<dyn CacheStore<K, V>>>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap)?;
        Some(Arc::new(TtlStore::<K, V>::new(cfg.max_entries, ttl)))
    }

    /// Wrap `inner` with the stores `cfg` enables.
    #[must_use]
    pub fn new(inner: Arc<dyn GreencastConnector>, cfg: &CacheConfig, clock: Clock) -> Self {
        let stores = Stores {
            historical: Self::maybe_store(cfg, Capability::HistoricalSales),
            forecast: Self::maybe_store(cfg, Capability::Forecast),
        };
        Self {
            inner,
            stores,
            clock,
        }
    }
}

#[async_trait]
impl GreencastConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    greencast_connector_accessors!(inner);
}

#[async_trait]
impl HistoricalSalesProvider for CachingConnector {
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError> {
        let inner = self
            .inner
            .as_historical_sales_provider()
            .ok_or_else(|| GreencastError::unsupported(Capability::HistoricalSales.as_str()))?;
        let Some(store) = &self.stores.historical else {
            return inner.historical_sales(days).await;
        };
        if let Some(v) = store.get(&days).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(connector = self.inner.name(), days, "historical sales cache hit");
            return Ok((*v).clone());
        }
        let value = inner.historical_sales(days).await?;
        store.put(days, Arc::new(value.clone())).await;
        Ok(value)
    }
}

#[async_trait]
impl ForecastProvider for CachingConnector {
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
        let inner = self
            .inner
            .as_forecast_provider()
            .ok_or_else(|| GreencastError::unsupported(Capability::Forecast.as_str()))?;
        let Some(store) = &self.stores.forecast else {
            return inner.forecast(weeks).await;
        };
        let key = ForecastKey {
            period_start: (self.clock)(),
            weeks,
        };
        if let Some(v) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                connector = self.inner.name(),
                weeks,
                period_start = %key.period_start,
                "forecast cache hit"
            );
            return Ok((*v).clone());
        }
        let value = inner.forecast(weeks).await?;
        store.put(key, Arc::new(value.clone())).await;
        Ok(value)
    }
}
