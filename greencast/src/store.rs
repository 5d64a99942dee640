//! Refresh state for one chart: current parameters, the last published
//! series, and the bookkeeping that keeps slow refreshes from clobbering
//! newer ones.

use std::sync::Arc;

use greencast_core::{CombinedPoint, GreencastError, ParamKind, QueryParameters, validate};
use tokio::sync::Mutex;

use crate::Greencast;
use crate::router::refresh::Reconciled;

/// Where the most recently issued refresh stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RefreshStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A refresh is in flight.
    Loading,
    /// Both series arrived and were published.
    Ready,
    /// One side failed; the other was published (`KeepSucceeded` only).
    Partial(GreencastError),
    /// The refresh failed and an empty series was published.
    Failed(GreencastError),
}

/// Identifies one issued refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken {
    /// Monotonic issue number, starting at 1.
    pub generation: u64,
    /// Parameters the refresh fetches with.
    pub params: QueryParameters,
}

/// What happened to a refresh or a parameter edit.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum RefreshOutcome {
    /// The merged series was published.
    Applied,
    /// One side failed; the other side was published.
    Partial(GreencastError),
    /// The refresh failed; an empty series was published.
    Failed(GreencastError),
    /// A newer refresh made this result stale; nothing was published.
    Superseded,
    /// The edit was invalid; parameters are unchanged and nothing was fetched.
    Rejected(GreencastError),
}

/// Point-in-time copy of the store's state.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    /// Current parameters.
    pub params: QueryParameters,
    /// Last published series.
    pub series: Vec<CombinedPoint>,
    /// Status of the latest issued refresh.
    pub status: RefreshStatus,
    /// Generation of the published series, if any.
    pub generation: Option<u64>,
}

#[derive(Debug)]
struct StoreState {
    params: QueryParameters,
    series: Vec<CombinedPoint>,
    status: RefreshStatus,
    latest_issued: u64,
    applied: Option<u64>,
}

impl StoreState {
    fn issue(&mut self) -> RefreshToken {
        self.latest_issued += 1;
        self.status = RefreshStatus::Loading;
        RefreshToken {
            generation: self.latest_issued,
            params: self.params,
        }
    }

    fn is_stale(&self, token: &RefreshToken) -> bool {
        token.params != self.params || self.applied.is_some_and(|a| token.generation < a)
    }
}

/// Holds the parameters and last-good series for one chart and drives
/// refreshes through a shared [`Greencast`].
///
/// The lock is never held across a fetch, so edits made while a refresh is in
/// flight take effect immediately and the earlier refresh is discarded when it
/// lands.
pub struct ForecastStore {
    greencast: Arc<Greencast>,
    state: Mutex<StoreState>,
}

impl ForecastStore {
    /// Create a store starting from the orchestrator's default parameters.
    #[must_use]
    pub fn new(greencast: Arc<Greencast>) -> Self {
        let params = greencast.config().default_params;
        Self::with_params(greencast, params)
    }

    /// Create a store starting from `params`.
    #[must_use]
    pub fn with_params(greencast: Arc<Greencast>, params: QueryParameters) -> Self {
        Self {
            greencast,
            state: Mutex::new(StoreState {
                params,
                series: Vec::new(),
                status: RefreshStatus::Idle,
                latest_issued: 0,
                applied: None,
            }),
        }
    }

    /// Current parameters.
    pub async fn params(&self) -> QueryParameters {
        self.state.lock().await.params
    }

    /// Copy of the full state.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let st = self.state.lock().await;
        StoreSnapshot {
            params: st.params,
            series: st.series.clone(),
            status: st.status.clone(),
            generation: st.applied,
        }
    }

    /// Issue a refresh token for the current parameters and mark the store loading.
    pub async fn begin_refresh(&self) -> RefreshToken {
        self.state.lock().await.issue()
    }

    /// Publish `result` for `token` unless a newer refresh has made it stale.
    ///
    /// A result is stale when the parameters changed since it was issued, or
    /// when a later generation has already been published. Status only
    /// changes for the most recently issued token.
    pub async fn commit(&self, token: RefreshToken, result: Reconciled) -> RefreshOutcome {
        let mut st = self.state.lock().await;
        if st.is_stale(&token) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "greencast::store",
                generation = token.generation,
                latest = st.latest_issued,
                "discarding superseded refresh"
            );
            return RefreshOutcome::Superseded;
        }

        let (outcome, status) = match result.error {
            None => (RefreshOutcome::Applied, RefreshStatus::Ready),
            Some(e) if result.partial => (
                RefreshOutcome::Partial(e.clone()),
                RefreshStatus::Partial(e),
            ),
            Some(e) => (RefreshOutcome::Failed(e.clone()), RefreshStatus::Failed(e)),
        };
        #[cfg(feature = "tracing")]
        if let RefreshStatus::Partial(e) | RefreshStatus::Failed(e) = &status {
            tracing::warn!(
                target: "greencast::store",
                generation = token.generation,
                error = %e,
                "refresh failed"
            );
        }

        st.series = result.series;
        st.applied = Some(token.generation);
        if token.generation == st.latest_issued {
            st.status = status;
        }
        outcome
    }

    /// Refetch both series for the current parameters and publish them.
    pub async fn refresh(&self) -> RefreshOutcome {
        let token = self.begin_refresh().await;
        self.run(token).await
    }

    /// Apply a user edit to one parameter.
    ///
    /// Invalid input is rejected without touching state or fetching. An
    /// accepted value replaces the parameter and triggers a refresh, even if
    /// it equals the current value.
    pub async fn update(&self, kind: ParamKind, raw: &str) -> RefreshOutcome {
        let value = match validate(kind, raw) {
            Ok(v) => v,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "greencast::store", error = %e, "ignoring parameter edit");
                return RefreshOutcome::Rejected(e);
            }
        };
        let token = {
            let mut st = self.state.lock().await;
            let Some(next) = st.params.with(kind, value) else {
                return RefreshOutcome::Rejected(GreencastError::parameter_rejected(kind, raw));
            };
            st.params = next;
            st.issue()
        };
        self.run(token).await
    }

    /// Edit the history window from raw user input.
    pub async fn set_history_days(&self, raw: &str) -> RefreshOutcome {
        self.update(ParamKind::HistoryDays, raw).await
    }

    /// Edit the forecast horizon from raw user input.
    pub async fn set_forecast_weeks(&self, raw: &str) -> RefreshOutcome {
        self.update(ParamKind::ForecastWeeks, raw).await
    }

    async fn run(&self, token: RefreshToken) -> RefreshOutcome {
        let result = self.greencast.combined_series(token.params).await;
        self.commit(token, result).await
    }
}
