use greencast_core::{Capability, ParamKind, SalesRecord};

use crate::Greencast;
use crate::greencast_router_method;

impl Greencast {
    greencast_router_method! {
        /// Fetch daily sales totals for the trailing `days`, ending today.
        ///
        /// Honors the builder's `FetchStrategy` and per-provider timeout. Records
        /// come back exactly as the provider sent them; see
        /// [`parse_sales_records`](greencast_core::parse_sales_records) for
        /// turning them into points.
        method: historical_sales(days: u32) -> Vec<SalesRecord>,
        accessor: as_historical_sales_provider,
        capability: Capability::HistoricalSales,
        param: ParamKind::HistoryDays,
        not_found: "historical sales",
        unit: "days",
        call: historical_sales
    }
}
