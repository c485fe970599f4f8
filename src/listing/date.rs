use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Numeric timestamps above this are milliseconds, otherwise seconds
const MILLIS_THRESHOLD: f64 = 1e12;

/// Parses a posting date from a listing node value
///
/// Accepts ISO-8601 timestamps (with or without fractional seconds or an
/// offset), bare `YYYY-MM-DD` dates, and Unix timestamps as numbers or
/// numeric strings. Timestamps convert to the UTC calendar date.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_timestamp),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parses a posting date from text
pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    text.parse::<f64>().ok().and_then(from_timestamp)
}

fn from_timestamp(raw: f64) -> Option<NaiveDate> {
    if !raw.is_finite() {
        return None;
    }

    let secs = if raw > MILLIS_THRESHOLD {
        raw / 1000.0
    } else {
        raw
    };

    DateTime::from_timestamp(secs.trunc() as i64, 0).map(|dt| dt.date_naive())
}
