use std::sync::Arc;

use async_trait::async_trait;
use greencast_core::{ForecastEnvelope, GreencastError, SalesRecord};
use reqwest::StatusCode;
use url::Url;

const CONNECTOR: &str = "greencast-http";

/// Historical sales endpoint abstraction (so we can inject fakes in tests).
#[async_trait]
pub trait PortalSales: Send + Sync {
    /// `GET historical-sales?days={days}`.
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError>;
}

/// Forecast endpoint abstraction.
#[async_trait]
pub trait PortalForecast: Send + Sync {
    /// `GET forecast?weeks={weeks}`.
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError>;
}

/// Production adapter: a `reqwest` client pointed at the portal's API root.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Use `http` against `base`. A missing trailing slash on the base path is
    /// added so endpoint names resolve under it rather than replacing its last
    /// segment.
    #[must_use]
    pub fn new(http: reqwest::Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { http, base }
    }

    /// Parse `base` and build with a default client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base` is not an absolute URL that can carry a path.
    pub fn try_from_base(base: &str) -> Result<Self, GreencastError> {
        let url = Url::parse(base)
            .map_err(|e| GreencastError::InvalidArg(format!("portal base url {base:?}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(GreencastError::InvalidArg(format!(
                "portal base url {base:?} cannot carry a path"
            )));
        }
        Ok(Self::new(reqwest::Client::new(), url))
    }

    /// API root every endpoint is resolved against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, name: &str, param: &str, value: u32) -> Result<Url, GreencastError> {
        let mut url = self
            .base
            .join(name)
            .map_err(|e| GreencastError::InvalidArg(format!("endpoint {name}: {e}")))?;
        url.query_pairs_mut()
            .append_pair(param, &value.to_string());
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url, context: &str) -> Result<T, GreencastError>
    where
        T: serde::de::DeserializeOwned,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "portal request");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_http_err(&e, context))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(map_status(status, context));
        }
        resp.json::<T>()
            .await
            .map_err(|e| map_http_err(&e, context))
    }
}

fn map_status(status: StatusCode, context: &str) -> GreencastError {
    match status {
        StatusCode::NOT_FOUND => GreencastError::not_found(context.to_string()),
        StatusCode::TOO_MANY_REQUESTS => {
            GreencastError::connector(CONNECTOR, format!("rate limit: {context}"))
        }
        s if s.is_server_error() => {
            GreencastError::connector(CONNECTOR, format!("server error {s}: {context}"))
        }
        s => GreencastError::connector(CONNECTOR, format!("status {s}: {context}")),
    }
}

fn map_http_err(e: &reqwest::Error, context: &str) -> GreencastError {
    if e.is_decode() {
        GreencastError::Data(format!("{context}: {e}"))
    } else if e.is_timeout() {
        GreencastError::connector(CONNECTOR, format!("timeout: {context}"))
    } else if let Some(status) = e.status() {
        map_status(status, context)
    } else {
        GreencastError::connector(CONNECTOR, format!("{context}: {e}"))
    }
}

#[async_trait]
impl PortalSales for RealAdapter {
    async fn historical_sales(&self, days: u32) -> Result<Vec<SalesRecord>, GreencastError> {
        let url = self.endpoint("historical-sales", "days", days)?;
        self.get_json(url, &format!("historical sales for {days} days"))
            .await
    }
}

#[async_trait]
impl PortalForecast for RealAdapter {
    async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
        let url = self.endpoint("forecast", "weeks", weeks)?;
        self.get_json(url, &format!("forecast for {weeks} weeks"))
            .await
    }
}

impl dyn PortalSales {
    /// Build a `PortalSales` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn PortalSales>
    where
        F: Send + Sync + 'static + Fn(u32) -> Result<Vec<SalesRecord>, GreencastError>,
    {
        struct FnSales<F>(F);
        #[async_trait]
        impl<F> PortalSales for FnSales<F>
        where
            F: Send + Sync + 'static + Fn(u32) -> Result<Vec<SalesRecord>, GreencastError>,
        {
            async fn historical_sales(
                &self,
                days: u32,
            ) -> Result<Vec<SalesRecord>, GreencastError> {
                (self.0)(days)
            }
        }
        Arc::new(FnSales(f))
    }
}

impl dyn PortalForecast {
    /// Build a `PortalForecast` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn PortalForecast>
    where
        F: Send + Sync + 'static + Fn(u32) -> Result<ForecastEnvelope, GreencastError>,
    {
        struct FnForecast<F>(F);
        #[async_trait]
        impl<F> PortalForecast for FnForecast<F>
        where
            F: Send + Sync + 'static + Fn(u32) -> Result<ForecastEnvelope, GreencastError>,
        {
            async fn forecast(&self, weeks: u32) -> Result<ForecastEnvelope, GreencastError> {
                (self.0)(weeks)
            }
        }
        Arc::new(FnForecast(f))
    }
}

/// Hands out shared adapter handles to [`crate::PortalConnector::from_adapter`].
///
/// Defaults answer `unsupported`, so a fake only overrides the endpoints it needs.
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn PortalSales>`.
    fn clone_arc_sales(&self) -> Arc<dyn PortalSales> {
        <dyn PortalSales>::from_fn(|_| Err(GreencastError::unsupported("historical-sales")))
    }
    /// Clone as `Arc<dyn PortalForecast>`.
    fn clone_arc_forecast(&self) -> Arc<dyn PortalForecast> {
        <dyn PortalForecast>::from_fn(|_| Err(GreencastError::unsupported("forecast")))
    }
}

impl CloneArcAdapters for RealAdapter {
    fn clone_arc_sales(&self) -> Arc<dyn PortalSales> {
        Arc::new(self.clone()) as Arc<dyn PortalSales>
    }
    fn clone_arc_forecast(&self) -> Arc<dyn PortalForecast> {
        Arc::new(self.clone()) as Arc<dyn PortalForecast>
    }
}
