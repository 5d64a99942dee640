use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::GreencastError;

/// Parse a wire date into a calendar date.
///
/// Accepted shapes, tried in order:
/// - `YYYY-MM-DD` (zero-padding optional, so `2024-1-9` is January 9th);
/// - RFC 3339 date-times (`2024-01-09T10:00:00+02:00`), using the date as
///   written in that offset;
/// - naive ISO-8601 date-times (`2024-01-09T10:00:00`, fractional seconds allowed).
///
/// Time-of-day is discarded; only the calendar date carries meaning.
///
/// # Errors
/// Returns `MalformedPoint` when `raw` matches none of the shapes above.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, GreencastError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(GreencastError::malformed_point(raw, "empty date"));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    Err(GreencastError::malformed_point(
        raw,
        "not a recognizable calendar date",
    ))
}

/// Short axis tick label, e.g. `Jan 02`.
#[must_use]
pub fn format_axis_tick(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Tooltip label, e.g. `Tue, Jan 2, 2024`.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
