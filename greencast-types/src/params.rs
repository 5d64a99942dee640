//! Bounded user-tunable query parameters.

use core::fmt;
use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Which query parameter an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    /// Length of the historical window, in days.
    HistoryDays,
    /// Forecast horizon, in weeks.
    ForecastWeeks,
}

impl ParamKind {
    /// Smallest accepted value.
    #[must_use]
    pub const fn min(self) -> u32 {
        match self {
            Self::HistoryDays => 7,
            Self::ForecastWeeks => 1,
        }
    }

    /// Largest accepted value.
    #[must_use]
    pub const fn max(self) -> u32 {
        match self {
            Self::HistoryDays => 365,
            Self::ForecastWeeks => 12,
        }
    }

    /// Inclusive accepted range.
    #[must_use]
    pub const fn bounds(self) -> RangeInclusive<u32> {
        self.min()..=self.max()
    }

    /// Whether `value` lies within the accepted range.
    #[must_use]
    pub const fn accepts(self, value: u32) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Stable identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HistoryDays => "history-days",
            Self::ForecastWeeks => "forecast-weeks",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of parameters that defines one refresh cycle.
///
/// Both values are always within [`ParamKind::bounds`]; the only ways to build
/// one are the checked constructors and deserialization, which re-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QueryParametersRepr")]
pub struct QueryParameters {
    history_days: u32,
    forecast_weeks: u32,
}

impl QueryParameters {
    /// Default history window (days).
    pub const DEFAULT_HISTORY_DAYS: u32 = 90;
    /// Default forecast horizon (weeks).
    pub const DEFAULT_FORECAST_WEEKS: u32 = 4;

    /// Build a parameter pair, returning `None` if either value is out of range.
    #[must_use]
    pub const fn new(history_days: u32, forecast_weeks: u32) -> Option<Self> {
        if ParamKind::HistoryDays.accepts(history_days)
            && ParamKind::ForecastWeeks.accepts(forecast_weeks)
        {
            Some(Self {
                history_days,
                forecast_weeks,
            })
        } else {
            None
        }
    }

    /// History window in days.
    #[must_use]
    pub const fn history_days(self) -> u32 {
        self.history_days
    }

    /// Forecast horizon in weeks.
    #[must_use]
    pub const fn forecast_weeks(self) -> u32 {
        self.forecast_weeks
    }

    /// Value of the given parameter.
    #[must_use]
    pub const fn get(self, kind: ParamKind) -> u32 {
        match kind {
            ParamKind::HistoryDays => self.history_days,
            ParamKind::ForecastWeeks => self.forecast_weeks,
        }
    }

    /// Copy with one parameter replaced; `None` if `value` is out of range.
    #[must_use]
    pub const fn with(self, kind: ParamKind, value: u32) -> Option<Self> {
        match kind {
            ParamKind::HistoryDays => Self::new(value, self.forecast_weeks),
            ParamKind::ForecastWeeks => Self::new(self.history_days, value),
        }
    }
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            history_days: Self::DEFAULT_HISTORY_DAYS,
            forecast_weeks: Self::DEFAULT_FORECAST_WEEKS,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryParametersRepr {
    history_days: u32,
    forecast_weeks: u32,
}

impl TryFrom<QueryParametersRepr> for QueryParameters {
    type Error = String;

    fn try_from(r: QueryParametersRepr) -> Result<Self, Self::Error> {
        Self::new(r.history_days, r.forecast_weeks).ok_or_else(|| {
            format!(
                "query parameters out of range: historyDays={} (allowed {}..={}), forecastWeeks={} (allowed {}..={})",
                r.history_days,
                ParamKind::HistoryDays.min(),
                ParamKind::HistoryDays.max(),
                r.forecast_weeks,
                ParamKind::ForecastWeeks.min(),
                ParamKind::ForecastWeeks.max(),
            )
        })
    }
}
