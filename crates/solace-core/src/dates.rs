//! Date normalization for form fields.
//!
//! The persistence layer stores date fields as ISO `YYYY-MM-DD` strings, but
//! records written by earlier iterations of the forms (or round-tripped
//! through the upstream store) may come back as full timestamps. Anything
//! loaded into form state is normalized to the civil-date string first.

/// Normalize a raw date value to `YYYY-MM-DD`.
///
/// Accepts a plain civil date, a civil datetime, or an RFC 3339 timestamp
/// (truncated to its UTC date). Returns `None` for anything unparseable —
/// the caller leaves the original value in place rather than discarding it.
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = trimmed.parse::<jiff::civil::Date>() {
        return Some(date.to_string());
    }
    if let Ok(dt) = trimmed.parse::<jiff::civil::DateTime>() {
        return Some(dt.date().to_string());
    }
    if let Ok(ts) = trimmed.parse::<jiff::Timestamp>() {
        return Some(ts.to_zoned(jiff::tz::TimeZone::UTC).date().to_string());
    }
    None
}

/// Whether a string is already a strict `YYYY-MM-DD` civil date.
pub fn is_iso_date(raw: &str) -> bool {
    raw.len() == 10 && raw.parse::<jiff::civil::Date>().is_ok()
}
