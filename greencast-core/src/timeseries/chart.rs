use chrono::NaiveDate;

use crate::types::CombinedPoint;

/// The observed line: `(date, value)` for every point that has a historical value.
///
/// Dates without one are skipped rather than zero-filled, so drawing straight
/// segments between consecutive pairs connects the line across gaps.
#[must_use]
pub fn historical_line(points: &[CombinedPoint]) -> Vec<(NaiveDate, f64)> {
    points
        .iter()
        .filter_map(|p| p.historical.map(|v| (p.date, v)))
        .collect()
}

/// The predicted line; see [`historical_line`] for gap handling.
#[must_use]
pub fn predicted_line(points: &[CombinedPoint]) -> Vec<(NaiveDate, f64)> {
    points
        .iter()
        .filter_map(|p| p.predicted.map(|v| (p.date, v)))
        .collect()
}
