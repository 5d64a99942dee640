//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Orchestrator request
//!     ↓
//! Outermost Middleware (last added; sees the request first)
//!     ↓
//! Inner Middleware (e.g., Cache)
//!     ↓
//! Raw Connector (e.g., PortalConnector - makes the HTTP calls)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order and is
//! **applied in reverse** during `build()` to construct the proper nesting.

use std::sync::Arc;

use greencast_core::connector::GreencastConnector;
use greencast_core::{CacheConfig, Middleware};
use serde_json::json;

use crate::cache::{CacheMiddleware, Clock};

const CACHE_LAYER: &str = "CachingMiddleware";

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn GreencastConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn GreencastConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace response caching.
    ///
    /// The cache is inserted outermost so a hit never reaches inner layers.
    /// If caching is already configured, it is removed and replaced.
    #[must_use]
    pub fn with_cache(self, cfg: &CacheConfig) -> Self {
        self.without_cache()
            .layer(Box::new(CacheMiddleware::new(cfg.clone())))
    }

    /// Like [`with_cache`](Self::with_cache), with forecast keys dated by `clock`.
    #[must_use]
    pub fn with_cache_clock(self, cfg: &CacheConfig, clock: Clock) -> Self {
        self.without_cache()
            .layer(Box::new(CacheMiddleware::with_clock(cfg.clone(), clock)))
    }

    /// Remove caching if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Names of the configured layers, outermost first.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|m| m.name()).collect()
    }

    /// Snapshot of the stack for logging: one `{name, config}` object per
    /// layer, outermost first, followed by the raw connector.
    #[must_use]
    pub fn describe(&self) -> serde_json::Value {
        let mut out: Vec<serde_json::Value> = self
            .layers
            .iter()
            .map(|m| json!({ "name": m.name(), "config": m.config_json() }))
            .collect();
        out.push(json!({ "name": "RawConnector", "config": { "name": self.raw.name() } }));
        serde_json::Value::Array(out)
    }

    /// Build the wrapped connector.
    ///
    /// With `layers = [A, B]` the result is `A(B(raw))`.
    #[must_use]
    pub fn build(self) -> Arc<dyn GreencastConnector> {
        let mut acc: Arc<dyn GreencastConnector> = Arc::clone(&self.raw);
        // Reverse iteration: apply innermost middleware first, outermost last
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
