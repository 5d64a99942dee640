//! Configuration types shared across the orchestrator, middleware, and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Capability, QueryParameters};

/// Strategy for selecting among connectors that provide the same capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next connector on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible connectors concurrently and return the first success.
    Latency,
}

/// What a refresh cycle publishes when only one of its two fetches fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RefreshFailurePolicy {
    /// Publish an empty series whenever either fetch fails, so the chart never
    /// mixes windows from different parameter sets.
    #[default]
    ResetBoth,
    /// Publish whichever series succeeded; the failed side contributes nothing.
    KeepSucceeded,
}

/// Global configuration for the `Greencast` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreencastConfig {
    /// Strategy for fetching from multiple connectors.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for each individual connector call.
    pub provider_timeout: Duration,
    /// Optional deadline for the concurrent historical + forecast pair.
    pub request_timeout: Option<Duration>,
    /// Publication rule for partially failed refreshes.
    pub failure_policy: RefreshFailurePolicy,
    /// Parameters a freshly created store starts from.
    pub default_params: QueryParameters,
    /// Connector names in preferred order; unlisted connectors keep registration order after these.
    pub provider_priority: Vec<String>,
}

impl Default for GreencastConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            failure_policy: RefreshFailurePolicy::default(),
            default_params: QueryParameters::default(),
            provider_priority: Vec::new(),
        }
    }
}

/// Time-to-live cache settings for connector responses.
///
/// A TTL of zero disables caching for that capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for forecast envelopes, in milliseconds.
    pub forecast_ttl_ms: u64,
    /// TTL for historical sales, in milliseconds.
    pub historical_ttl_ms: u64,
    /// Maximum number of cached responses per capability.
    pub max_entries: u64,
}

impl CacheConfig {
    /// TTL for a capability, or `None` when caching is disabled for it.
    #[must_use]
    pub const fn ttl_for(&self, cap: Capability) -> Option<Duration> {
        let ms = match cap {
            Capability::Forecast => self.forecast_ttl_ms,
            Capability::HistoricalSales => self.historical_ttl_ms,
        };
        if ms == 0 {
            None
        } else {
            Some(Duration::from_millis(ms))
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // The portal regenerates forecasts at most once per day.
            forecast_ttl_ms: 60 * 60 * 1000,
            historical_ttl_ms: 60 * 1000,
            max_entries: 64,
        }
    }
}
