use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;

use crate::GreencastError;
use crate::timeseries::dates::parse_calendar_date;
use crate::types::{
    CombinedPoint, ForecastPoint, ForecastRecord, HistoricalPoint, SalesRecord,
};

/// Points that parsed, plus the records that were dropped and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSeries<T> {
    /// Parsed points in input order.
    pub points: Vec<T>,
    /// One `MalformedPoint` per dropped record, in input order.
    pub rejected: Vec<GreencastError>,
}

impl<T> Default for ParsedSeries<T> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

fn check_quantity(raw_date: &str, q: f64) -> Result<f64, GreencastError> {
    if !q.is_finite() {
        return Err(GreencastError::malformed_point(
            raw_date,
            format!("quantity {q} is not finite"),
        ));
    }
    if q < 0.0 {
        return Err(GreencastError::malformed_point(
            raw_date,
            format!("quantity {q} is negative"),
        ));
    }
    Ok(q)
}

fn parse_each<R, T>(
    records: &[R],
    parse: impl Fn(&R) -> Result<T, GreencastError>,
) -> ParsedSeries<T> {
    let mut out = ParsedSeries {
        points: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };
    for r in records {
        match parse(r) {
            Ok(p) => out.points.push(p),
            Err(e) => out.rejected.push(e),
        }
    }
    out
}

/// Parse `historical-sales` rows into typed points.
///
/// Rows with an unparseable date or a negative/non-finite quantity land in
/// `rejected`; nothing here logs, callers decide how to report them.
#[must_use]
pub fn parse_sales_records(records: &[SalesRecord]) -> ParsedSeries<HistoricalPoint> {
    parse_each(records, |r| {
        let date = parse_calendar_date(&r.date)?;
        let q = check_quantity(&r.date, r.total_trays_sold)?;
        Ok(HistoricalPoint::new(date, q))
    })
}

/// Parse forecast predictions into typed points. Same drop rules as
/// [`parse_sales_records`].
#[must_use]
pub fn parse_forecast_records(records: &[ForecastRecord]) -> ParsedSeries<ForecastPoint> {
    parse_each(records, |r| {
        let date = parse_calendar_date(&r.date)?;
        let q = check_quantity(&r.date, r.predicted_trays)?;
        Ok(ForecastPoint::new(date, q))
    })
}

// Field-level overwrite: a field the newer partial carries replaces the
// existing one, a field it lacks leaves the existing one alone.
fn overlay(target: &mut CombinedPoint, newer: CombinedPoint) {
    if newer.historical.is_some() {
        target.historical = newer.historical;
    }
    if newer.predicted.is_some() {
        target.predicted = newer.predicted;
    }
}

/// Merge a historical and a forecast series onto one calendar-date axis.
///
/// - Every input point becomes a partial `CombinedPoint` (historical first,
///   then forecast) and partials are reduced by date.
/// - On a repeated date the later partial overwrites the fields it carries, so
///   a date present in both series gets both fields, and a date repeated
///   within one series keeps the last value seen.
/// - Output is sorted ascending by calendar date with one point per date.
/// - Points are never invented: every output date occurs in an input.
///
/// Pure; inputs are consumed by value and nothing is retained.
pub fn merge_series<H, F>(historical: H, forecast: F) -> Vec<CombinedPoint>
where
    H: IntoIterator<Item = HistoricalPoint>,
    F: IntoIterator<Item = ForecastPoint>,
{
    let partials = historical
        .into_iter()
        .map(CombinedPoint::from)
        .chain(forecast.into_iter().map(CombinedPoint::from));

    let mut by_date: BTreeMap<NaiveDate, CombinedPoint> = BTreeMap::new();
    for partial in partials {
        match by_date.entry(partial.date) {
            Entry::Vacant(v) => {
                v.insert(partial);
            }
            Entry::Occupied(mut o) => overlay(o.get_mut(), partial),
        }
    }
    by_date.into_values().collect()
}

/// Parse and merge wire records in one step, silently dropping malformed rows.
///
/// Use [`parse_sales_records`] / [`parse_forecast_records`] directly when the
/// dropped rows need to be reported.
#[must_use]
pub fn merge_records(sales: &[SalesRecord], predictions: &[ForecastRecord]) -> Vec<CombinedPoint> {
    let h = parse_sales_records(sales);
    let f = parse_forecast_records(predictions);
    merge_series(h.points, f.points)
}
