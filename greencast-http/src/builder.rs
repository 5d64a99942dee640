use std::sync::Arc;

use greencast_core::connector::GreencastConnector;
use greencast_core::{CacheConfig, GreencastError};
use greencast_middleware::ConnectorBuilder as GenericConnectorBuilder;

use crate::PortalConnector;

/// Builder type alias specialized for portal connectors.
pub type PortalConnectorBuilder = GenericConnectorBuilder;

impl PortalConnector {
    /// Returns a builder around the connector for `base` with default
    /// response caching: forecasts for an hour, sales for a minute.
    ///
    /// Customize with the builder methods before calling `.build()`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base` is not a usable absolute URL.
    pub fn builder(base: &str) -> Result<PortalConnectorBuilder, GreencastError> {
        let raw: Arc<dyn GreencastConnector> = Arc::new(Self::with_base_url(base)?);
        Ok(GenericConnectorBuilder::new(raw).with_cache(&CacheConfig::default()))
    }
}
