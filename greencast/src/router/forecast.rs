use greencast_core::{Capability, ForecastEnvelope, ParamKind};

use crate::Greencast;
use crate::greencast_router_method;

impl Greencast {
    greencast_router_method! {
        /// Fetch daily demand predictions for the next `weeks`, starting today.
        method: forecast(weeks: u32) -> ForecastEnvelope,
        accessor: as_forecast_provider,
        capability: Capability::Forecast,
        param: ParamKind::ForecastWeeks,
        not_found: "forecast",
        unit: "weeks",
        call: forecast
    }
}
