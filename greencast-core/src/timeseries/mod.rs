//! Time-series utilities shared by connectors, the orchestrator, and presenters.
//!
//! Modules include:
//! - `dates`: parse wire dates into calendar dates and format them for charts
//! - `merge`: reconcile historical and forecast series on one date axis
//! - `chart`: project a merged series into per-line point lists
/// Per-line projections of a merged series.
pub mod chart;
/// Calendar-date parsing and display formatting.
pub mod dates;
/// Merge utilities for joining historical and forecast series.
pub mod merge;
