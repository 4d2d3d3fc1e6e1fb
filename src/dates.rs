//! Best-effort date parsing and rendering.
//!
//! Raw dates arrive in whatever shape the upstream spreadsheets used. The
//! policy is uniform across entities: parse what matches one of the known
//! layouts, null out the rest, never drop the row.

use chrono::{NaiveDate, NaiveDateTime};

/// Display layout for cleaned dates.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

// ISO first so "2024-01-15" never reads as day-first; day-first before
// month-first because the source data is Brazilian.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a raw date string against the known layouts, in order.
///
/// Returns `None` for anything that matches no layout, including the empty
/// string.
#[must_use]
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Renders a date in the `dd/mm/yyyy` display layout.
#[must_use]
pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parses a nullable raw date and renders it for display.
///
/// This is the whole cleaning rule for the three display-date columns:
/// unparseable or missing input becomes null, everything else becomes
/// `dd/mm/yyyy`. Already-cleaned values re-parse to themselves.
#[must_use]
pub fn normalize_display(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_flexible).map(to_display)
}

/// Converts a date to days since the Unix epoch, the unit of Arrow `Date32`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_days_since_epoch(date: NaiveDate) -> i32 {
    // NaiveDate::default() is 1970-01-01.
    date.signed_duration_since(NaiveDate::default()).num_days() as i32
}
