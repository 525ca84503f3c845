//! `en-IN` short date formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Month abbreviations used by the `en-IN` locale (note "Sept").
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Error returned when a date string cannot be interpreted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date: {0:?}")]
pub struct DateFormatError(pub String);

/// Format a date as `D Mon YYYY` (e.g. `16 Oct 2026`).
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{} {month} {}", date.day(), date.year())
}

/// Parse and format a date string.
///
/// Accepted inputs:
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DD HH:MM:SS[.fff]` (the way the backend renders timestamps)
/// - RFC 3339 timestamps; the calendar date in the timestamp's own offset is used
///
/// # Errors
///
/// Returns [`DateFormatError`] for any other input.
pub fn format_date_str(input: &str) -> Result<String, DateFormatError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(format_date(date));
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(format_date(datetime.date()));
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(format_date(datetime.date_naive()));
    }

    Err(DateFormatError(input.to_owned()))
}
