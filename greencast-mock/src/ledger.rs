//! In-memory order ledger backing [`crate::MockConnector`].
//!
//! Historical sales are derived from completed orders, and the forecast is the
//! flat-average fallback a portal backend serves when it has no trained model.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use greencast_core::{ForecastEnvelope, ForecastRecord, SalesRecord};

/// Trailing window, in days, the fallback forecast averages over.
pub const FALLBACK_HISTORY_DAYS: u32 = 60;

/// Lifecycle of an order. Only `Completed` orders count as sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, not yet confirmed.
    Pending,
    /// Confirmed, awaiting delivery.
    Confirmed,
    /// Delivered and paid.
    Completed,
    /// Cancelled by the customer or the farm.
    Cancelled,
}

/// A customer order: one line per product, quantities in trays.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Calendar day the order was placed.
    pub date: NaiveDate,
    /// Tray quantity of each line item.
    pub items: Vec<u32>,
    /// Total price charged for the order.
    pub total_price: f64,
    /// Current status.
    pub status: OrderStatus,
}

impl Order {
    /// A completed single-line order.
    #[must_use]
    pub fn completed(date: NaiveDate, trays: u32, total_price: f64) -> Self {
        Self {
            date,
            items: vec![trays],
            total_price,
            status: OrderStatus::Completed,
        }
    }

    /// Sum of tray quantities across all line items.
    #[must_use]
    pub fn trays(&self) -> u32 {
        self.items.iter().sum()
    }
}

/// Append-only collection of orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesLedger {
    orders: Vec<Order>,
}

impl SalesLedger {
    /// Empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Record an order.
    pub fn record(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// All recorded orders, in insertion order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Pseudo-random but reproducible order history covering the `days`
    /// days up to and including `today`.
    ///
    /// Every day gets zero to three orders; roughly one in six is left in a
    /// non-completed state so the completed-only filter has something to do.
    #[must_use]
    pub fn demo(today: NaiveDate, days: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ledger = Self::new();
        for back in 0..=u64::from(days) {
            let Some(date) = today.checked_sub_days(Days::new(back)) else {
                break;
            };
            for _ in 0..rng.random_range(0..=3u32) {
                let lines = rng.random_range(1..=3usize);
                let items: Vec<u32> = (0..lines).map(|_| rng.random_range(1..=8)).collect();
                let trays: u32 = items.iter().sum();
                let status = match rng.random_range(0..6u8) {
                    0 => OrderStatus::Cancelled,
                    1 => OrderStatus::Pending,
                    _ => OrderStatus::Completed,
                };
                ledger.record(Order {
                    date,
                    items,
                    total_price: f64::from(trays) * 12.5,
                    status,
                });
            }
        }
        ledger
    }

    /// Per-day totals of completed orders dated within `days` days before
    /// `today` (both ends inclusive), ascending by date.
    #[must_use]
    pub fn daily_sales(&self, days: u32, today: NaiveDate) -> Vec<SalesRecord> {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        let mut by_day: BTreeMap<NaiveDate, (u32, f64)> = BTreeMap::new();
        for order in self.orders.iter().filter(|o| {
            o.status == OrderStatus::Completed && (start..=today).contains(&o.date)
        }) {
            let entry = by_day.entry(order.date).or_default();
            entry.0 += order.trays();
            entry.1 += order.total_price;
        }

        by_day
            .into_iter()
            .map(|(date, (trays, revenue))| SalesRecord {
                id: None,
                date: date.to_string(),
                total_trays_sold: f64::from(trays),
                revenue: Some(revenue),
            })
            .collect()
    }

    /// Flat forecast for `weeks * 7` days starting at `today`.
    ///
    /// Every prediction is the mean daily total over the trailing
    /// [`FALLBACK_HISTORY_DAYS`] (days without sales do not count), rounded to
    /// one decimal; zero when there is no history at all.
    #[must_use]
    pub fn forecast_fallback(&self, weeks: u32, today: NaiveDate) -> ForecastEnvelope {
        let history = self.daily_sales(FALLBACK_HISTORY_DAYS, today);
        let mean = if history.is_empty() {
            0.0
        } else {
            let total: f64 = history.iter().map(|r| r.total_trays_sold).sum();
            #[allow(clippy::cast_precision_loss)]
            let n = history.len() as f64;
            total / n
        };
        let predicted = (mean * 10.0).round() / 10.0;

        let horizon = u64::from(weeks) * 7;
        let predictions = (0..horizon)
            .filter_map(|i| today.checked_add_days(Days::new(i)))
            .map(|date| ForecastRecord::new(date.to_string(), predicted))
            .collect();
        let period_end = today
            .checked_add_days(Days::new(horizon))
            .map(|d| d.to_string());

        ForecastEnvelope {
            id: Some(format!("fallback-{today}-{weeks}")),
            period_start: Some(today.to_string()),
            period_end,
            predictions,
            created_at: None,
        }
    }
}
