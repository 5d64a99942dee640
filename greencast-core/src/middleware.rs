//! Middleware trait for wrapping `GreencastConnector` implementations.

use std::sync::Arc;

use crate::connector::GreencastConnector;

/// Trait implemented by connector middleware layers.
///
/// A middleware consumes an inner `GreencastConnector` and returns a wrapped
/// connector that augments its behavior (e.g., response caching).
pub trait Middleware: Send + Sync {
    /// Wrap `inner` and return the wrapped connector.
    fn apply(self: Box<Self>, inner: Arc<dyn GreencastConnector>) -> Arc<dyn GreencastConnector>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
