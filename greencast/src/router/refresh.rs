use greencast_core::{
    Capability, CombinedPoint, ForecastEnvelope, GreencastError, QueryParameters,
    RefreshFailurePolicy, SalesRecord, merge_series, parse_forecast_records, parse_sales_records,
};

use crate::Greencast;
use crate::core::with_request_deadline;

/// Raw outcome of one concurrent historical + forecast fetch pair.
#[derive(Debug, Clone)]
pub struct SeriesFetch {
    /// Parameters the pair was issued with.
    pub params: QueryParameters,
    /// Historical side, as routed.
    pub historical: Result<Vec<SalesRecord>, GreencastError>,
    /// Forecast side, as routed.
    pub forecast: Result<ForecastEnvelope, GreencastError>,
}

/// A fetch pair reduced to a publishable series under a failure policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// Merged, date-ordered series. Empty when the policy discards partial data.
    pub series: Vec<CombinedPoint>,
    /// Failure to surface, if either side failed.
    pub error: Option<GreencastError>,
    /// Whether exactly one side failed and the other was still published.
    pub partial: bool,
    /// Number of records dropped as malformed.
    pub dropped: usize,
}

impl SeriesFetch {
    /// Reduce to a series, merging whatever `policy` allows to be published.
    ///
    /// Malformed records are dropped and counted; they never fail the refresh.
    /// When both sides fail the error aggregates both.
    #[must_use]
    pub fn reconcile(&self, policy: RefreshFailurePolicy) -> Reconciled {
        let hist = self.historical.as_ref().ok().map(|r| parse_sales_records(r));
        let fcst = self
            .forecast
            .as_ref()
            .ok()
            .map(|e| parse_forecast_records(&e.predictions));

        let dropped = hist.as_ref().map_or(0, |p| p.rejected.len())
            + fcst.as_ref().map_or(0, |p| p.rejected.len());
        #[cfg(feature = "tracing")]
        for e in hist
            .iter()
            .flat_map(|p| p.rejected.iter())
            .chain(fcst.iter().flat_map(|p| p.rejected.iter()))
        {
            tracing::warn!(target: "greencast::router", error = %e, "dropping malformed record");
        }

        let error = match (&self.historical, &self.forecast) {
            (Ok(_), Ok(_)) => None,
            (Err(h), Ok(_)) => Some(h.clone()),
            (Ok(_), Err(f)) => Some(f.clone()),
            (Err(h), Err(f)) => Some(GreencastError::AllProvidersFailed(vec![
                h.clone(),
                f.clone(),
            ])),
        };
        let both_failed = self.historical.is_err() && self.forecast.is_err();

        let publish = error.is_none() || policy == RefreshFailurePolicy::KeepSucceeded;
        let series = if publish {
            merge_series(
                hist.map(|p| p.points).unwrap_or_default(),
                fcst.map(|p| p.points).unwrap_or_default(),
            )
        } else {
            Vec::new()
        };

        Reconciled {
            series,
            partial: error.is_some() && publish && !both_failed,
            error,
            dropped,
        }
    }
}

impl Greencast {
    /// Fetch both series for `params` concurrently.
    ///
    /// Each side is routed independently and bounded by the configured request
    /// deadline; one side failing never cancels the other.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "greencast::router",
            skip(self),
            fields(
                days = params.history_days(),
                weeks = params.forecast_weeks(),
            ),
        )
    )]
    pub async fn fetch_series(&self, params: QueryParameters) -> SeriesFetch {
        let deadline = self.cfg.request_timeout;
        let (historical, forecast) = tokio::join!(
            with_request_deadline(
                Capability::HistoricalSales.as_str(),
                deadline,
                self.historical_sales(params.history_days()),
            ),
            with_request_deadline(
                Capability::Forecast.as_str(),
                deadline,
                self.forecast(params.forecast_weeks()),
            ),
        );
        SeriesFetch {
            params,
            historical,
            forecast,
        }
    }

    /// Fetch both series for `params` and reconcile them under the configured
    /// failure policy.
    pub async fn combined_series(&self, params: QueryParameters) -> Reconciled {
        self.fetch_series(params)
            .await
            .reconcile(self.cfg.failure_policy)
    }
}
