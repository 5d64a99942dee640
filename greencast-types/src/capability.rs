use core::fmt;
use serde::{Deserialize, Serialize};

/// Capability labels for routing, errors, caching, and telemetry.
///
/// Each label maps to one connector role trait and one portal endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Historical sales actuals (`GET historical-sales?days=`).
    HistoricalSales,
    /// Predicted demand (`GET forecast?weeks=`).
    Forecast,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HistoricalSales => "historical-sales",
            Self::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
