//! Typed points on a calendar-date axis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An observed quantity (trays sold or harvested) for a past date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    /// Calendar date; no time-of-day meaning.
    pub date: NaiveDate,
    /// Total units on that date; non-negative.
    pub actual_quantity: f64,
}

impl HistoricalPoint {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(date: NaiveDate, actual_quantity: f64) -> Self {
        Self {
            date,
            actual_quantity,
        }
    }
}

/// A predicted quantity for a (typically future) date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Model output; non-negative.
    pub predicted_quantity: f64,
}

impl ForecastPoint {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(date: NaiveDate, predicted_quantity: f64) -> Self {
        Self {
            date,
            predicted_quantity,
        }
    }
}

/// One date of the reconciled chart dataset.
///
/// At least one of `historical` / `predicted` is present on every point the
/// merge produces. A missing field means "no value at this date", not zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPoint {
    /// Unique key within a merged series.
    pub date: NaiveDate,
    /// Observed quantity, if the historical series has this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical: Option<f64>,
    /// Predicted quantity, if the forecast series has this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

impl CombinedPoint {
    /// A point carrying only an observed value.
    #[must_use]
    pub const fn historical(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            historical: Some(value),
            predicted: None,
        }
    }

    /// A point carrying only a predicted value.
    #[must_use]
    pub const fn predicted(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            historical: None,
            predicted: Some(value),
        }
    }

    /// True when both series contributed to this date (the "today" seam).
    #[must_use]
    pub const fn is_overlap(&self) -> bool {
        self.historical.is_some() && self.predicted.is_some()
    }
}

impl From<HistoricalPoint> for CombinedPoint {
    fn from(p: HistoricalPoint) -> Self {
        Self::historical(p.date, p.actual_quantity)
    }
}

impl From<ForecastPoint> for CombinedPoint {
    fn from(p: ForecastPoint) -> Self {
        Self::predicted(p.date, p.predicted_quantity)
    }
}
