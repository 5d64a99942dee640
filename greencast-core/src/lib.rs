#![doc = include_str!("../README.md")]
//! greencast-core
//!
//! Core types, traits, and utilities shared across the greencast workspace.
//!
//! - `types`: re-exported data structures (points, wire records, parameters, config).
//! - `connector`: the `GreencastConnector` trait and its capability role traits.
//! - `timeseries`: parse, merge, and project historical and forecast series.
//! - `validate`: bounds checking for user-entered query parameters.
//!
//! Everything under `timeseries` and `validate` is pure and synchronous; the
//! async surface is limited to the connector traits.
#![warn(missing_docs)]

/// Connector capability traits and the primary `GreencastConnector` interface.
pub mod connector;
/// Unified error type.
pub mod error;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Time-series utilities for parsing, merging, and chart projection.
pub mod timeseries;
pub mod types;
/// Query parameter validation.
pub mod validate;

pub use connector::GreencastConnector;
pub use error::GreencastError;
pub use middleware::Middleware;
pub use timeseries::chart::{historical_line, predicted_line};
pub use timeseries::dates::{format_axis_tick, format_tooltip_date, parse_calendar_date};
pub use timeseries::merge::{
    ParsedSeries, merge_records, merge_series, parse_forecast_records, parse_sales_records,
};
pub use types::*;
pub use validate::validate;
