#![doc = include_str!("../README.md")]
//! Greencast data transfer objects, query parameters, and configuration primitives.
//!
//! - `series`: typed points on a calendar-date axis (historical, forecast, combined).
//! - `records`: wire shapes returned by portal backends, dates kept as raw strings.
//! - `params`: the two bounded user-tunable query parameters.
//! - `config`: orchestrator and cache configuration.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod params;
mod records;
mod series;

pub use capability::Capability;
pub use config::{CacheConfig, FetchStrategy, GreencastConfig, RefreshFailurePolicy};
pub use connector::ConnectorKey;
pub use params::{ParamKind, QueryParameters};
pub use records::{ForecastEnvelope, ForecastRecord, SalesRecord};
pub use series::{CombinedPoint, ForecastPoint, HistoricalPoint};
