use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use greencast_core::connector::ConnectorKey;
use greencast_core::{
    Capability, FetchStrategy, GreencastConfig, GreencastConnector, GreencastError,
    QueryParameters, RefreshFailurePolicy,
};

use crate::router::util::collapse_errors;

/// Orchestrator that routes fetches across registered connectors.
pub struct Greencast {
    pub(crate) connectors: Vec<Arc<dyn GreencastConnector>>,
    pub(crate) cfg: GreencastConfig,
}

/// Builder for constructing a `Greencast` orchestrator with custom configuration.
pub struct GreencastBuilder {
    connectors: Vec<Arc<dyn GreencastConnector>>,
    cfg: GreencastConfig,
}

impl Default for GreencastBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GreencastBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Starts with no connectors; register at least one via [`with_connector`](Self::with_connector).
    /// Defaults: priority-with-fallback fetches, 10s provider timeout, no
    /// request deadline, atomic (`ResetBoth`) refresh failures, 90 days / 4 weeks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: GreencastConfig::default(),
        }
    }

    /// Start from a complete configuration, e.g. one deserialized from a file.
    #[must_use]
    pub fn config(mut self, cfg: GreencastConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Register a provider connector.
    ///
    /// Registration order is the provider order unless [`prefer`](Self::prefer)
    /// says otherwise. Duplicates are not deduplicated.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn GreencastConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred providers using connector instances.
    ///
    /// An ordering hint only: unlisted but capable connectors are still tried
    /// after the listed ones.
    #[must_use]
    pub fn prefer(mut self, connectors_desc: &[Arc<dyn GreencastConnector>]) -> Self {
        self.cfg.provider_priority = connectors_desc
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        self
    }

    /// Set preferred providers by key, e.g. `PortalConnector::KEY`.
    #[must_use]
    pub fn prefer_keys(mut self, keys: &[ConnectorKey]) -> Self {
        self.cfg.provider_priority = keys.iter().map(|k| k.as_str().to_string()).collect();
        self
    }

    /// Select the fetch strategy for multi-provider requests.
    ///
    /// - `PriorityWithFallback`: deterministic order, per-provider timeout,
    ///   aggregated errors.
    /// - `Latency`: race all eligible providers and return the first success.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider call timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound each refresh's concurrent historical + forecast pair.
    ///
    /// When exceeded, the unfinished side fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Choose what a refresh publishes when only one of its fetches fails.
    #[must_use]
    pub const fn failure_policy(mut self, policy: RefreshFailurePolicy) -> Self {
        self.cfg.failure_policy = policy;
        self
    }

    /// Parameters a new [`ForecastStore`](crate::ForecastStore) starts from.
    #[must_use]
    pub const fn default_params(mut self, params: QueryParameters) -> Self {
        self.cfg.default_params = params;
        self
    }

    /// Build the `Greencast` orchestrator.
    ///
    /// Unknown or repeated names in the priority list are dropped.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`](Self::with_connector).
    pub fn build(mut self) -> Result<Greencast, GreencastError> {
        if self.connectors.is_empty() {
            return Err(GreencastError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        let mut seen: HashSet<String> = HashSet::new();
        self.cfg
            .provider_priority
            .retain(|n| known.contains(n.as_str()) && seen.insert(n.clone()));

        Ok(Greencast {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute a provider error to `connector` unless it already carries
/// routing information.
pub(crate) fn tag_err(connector: &str, e: GreencastError) -> GreencastError {
    match e {
        e @ (GreencastError::NotFound { .. }
        | GreencastError::ProviderTimeout { .. }
        | GreencastError::Connector { .. }
        | GreencastError::RequestTimeout { .. }
        | GreencastError::AllProvidersTimedOut { .. }
        | GreencastError::AllProvidersFailed(_)) => e,
        other => GreencastError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut`, failing with `RequestTimeout { capability }` once `deadline`
/// elapses. `None` means no deadline.
pub(crate) async fn with_request_deadline<T, Fut>(
    capability: &'static str,
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, GreencastError>
where
    Fut: core::future::Future<Output = Result<T, GreencastError>>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .unwrap_or_else(|_| Err(GreencastError::request_timeout(capability))),
        None => fut.await,
    }
}

impl Greencast {
    /// Start building a new `Greencast` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use greencast::{FetchStrategy, Greencast};
    /// use greencast_http::PortalConnector;
    /// use greencast_mock::MockConnector;
    ///
    /// let portal = Arc::new(PortalConnector::with_base_url("http://localhost:8000/")?);
    /// let mock = Arc::new(MockConnector::new());
    ///
    /// let gc = Greencast::builder()
    ///     .with_connector(portal.clone())
    ///     .with_connector(mock)
    ///     .fetch_strategy(FetchStrategy::PriorityWithFallback)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> GreencastBuilder {
        GreencastBuilder::new()
    }

    /// Effective configuration after `build()` normalization.
    #[must_use]
    pub const fn config(&self) -> &GreencastConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "greencast::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, GreencastError>
    where
        Fut: core::future::Future<Output = Result<T, GreencastError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(GreencastError::provider_timeout(connector_name, capability))
        })
    }

    pub(crate) fn ordered(&self) -> Vec<Arc<dyn GreencastConnector>> {
        let mut out: Vec<(usize, Arc<dyn GreencastConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if self.cfg.provider_priority.is_empty() {
            return out.into_iter().map(|(_, c)| c).collect();
        }
        let pos: HashMap<&str, usize> = self
            .cfg
            .provider_priority
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();
        out.sort_by_key(|(orig_i, c)| (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i));
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Generic single-result fetch.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies the per-provider timeout in both modes
    /// - `call` returns `None` for connectors lacking the capability; if every
    ///   connector does, the result is `Unsupported`
    /// - Failures collapse per [`collapse_errors`]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "greencast::core::fetch_single",
            skip(self, call),
            fields(capability = %capability, strategy = ?self.cfg.fetch_strategy),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, GreencastError>
    where
        T: Send,
        F: Fn(Arc<dyn GreencastConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, GreencastError>> + Send,
    {
        match self.cfg.fetch_strategy {
            FetchStrategy::Latency => self.fetch_single_latency(capability, not_found_what, call).await,
            _ => {
                self.fetch_single_priority_with_fallback(capability, not_found_what, call)
                    .await
            }
        }
    }

    async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, GreencastError>
    where
        T: Send,
        F: Fn(Arc<dyn GreencastConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, GreencastError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<GreencastError> = Vec::new();

        for c in self.ordered() {
            let Some(fut) = call(Arc::clone(&c)) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability.as_str(),
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e @ (GreencastError::NotFound { .. } | GreencastError::ProviderTimeout { .. })) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "provider attempt failed; falling back");
                    errors.push(e);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "provider attempt failed; falling back");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }

    async fn fetch_single_latency<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, GreencastError>
    where
        T: Send,
        F: Fn(Arc<dyn GreencastConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, GreencastError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        for c in self.ordered() {
            if let Some(fut) = call(Arc::clone(&c)) {
                let name = c.name();
                let timeout = self.cfg.provider_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::provider_call_with_timeout(name, capability.as_str(), timeout, fut)
                            .await,
                    )
                });
            }
        }
        let attempted_any = !futs.is_empty();

        let mut errors: Vec<GreencastError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(
                    e @ (GreencastError::ProviderTimeout { .. } | GreencastError::NotFound { .. }),
                ) => errors.push(e),
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }
}
