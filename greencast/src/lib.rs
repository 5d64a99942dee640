#![doc = include_str!("../README.md")]
//! Greencast reconciles historical sales and demand forecasts into one
//! chart-ready series.
//!
//! Overview
//! - Routes fetches to connectors that implement the `greencast_core` contracts.
//! - Issues the historical and forecast fetches concurrently and merges them
//!   on a shared calendar-date axis.
//! - Keeps per-chart state in a [`ForecastStore`] that validates parameter
//!   edits and discards results made stale by a newer refresh.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-provider timeout, aggregates
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races eligible providers; lowest tail latency but higher request fanout.
//! - Failure policy:
//!   - `ResetBoth` (default): any failed side publishes an empty series, so the
//!     chart never mixes a fresh window with a stale one.
//!   - `KeepSucceeded`: publishes whichever side arrived.
//! - Malformed records (unparseable dates, negative or non-finite quantities)
//!   are dropped from the series and never fail a refresh.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use greencast::{ForecastStore, Greencast, RefreshOutcome};
//! use greencast_http::PortalConnector;
//! use greencast_mock::MockConnector;
//!
//! let portal = PortalConnector::builder("http://localhost:8000/api/")?.build();
//! let gc = Greencast::builder()
//!     .with_connector(portal)
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .build()?;
//!
//! let store = ForecastStore::new(Arc::new(gc));
//! let _ = store.refresh().await;
//! assert!(matches!(
//!     store.set_forecast_weeks("13").await,
//!     RefreshOutcome::Rejected(_)
//! ));
//! let snap = store.snapshot().await;
//! ```
//!
//! See `greencast/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;
mod store;

pub use crate::core::{Greencast, GreencastBuilder};
pub use router::refresh::{Reconciled, SeriesFetch};
pub use router::util::collapse_errors;
pub use store::{ForecastStore, RefreshOutcome, RefreshStatus, RefreshToken, StoreSnapshot};

pub use greencast_middleware::{CacheMiddleware, ConnectorBuilder};

// Re-export core types for convenience
pub use greencast_core::{
    CacheConfig, Capability, CombinedPoint, ConnectorKey, FetchStrategy, ForecastEnvelope,
    ForecastPoint, ForecastRecord, GreencastConfig, GreencastConnector, GreencastError,
    HistoricalPoint, ParamKind, QueryParameters, RefreshFailurePolicy, SalesRecord,
    format_axis_tick, format_tooltip_date, historical_line, merge_records, merge_series,
    predicted_line, validate,
};
