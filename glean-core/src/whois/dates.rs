use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
];

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%b %d %Y",
    "%Y%m%d",
];

/// Normalizes a registry date into a UTC timestamp.
///
/// Dates without a time component are taken as midnight UTC. Returns `None`
/// for anything unrecognized.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let cleaned = date_str
        .trim()
        .replace(" (UTC)", "Z")
        .replace(" UTC", "Z")
        .replace(" +0000", "Z");

    if cleaned.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in &OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.and_utc());
        }
    }

    // Date-only formats never carry the normalized zone suffix.
    let date_only = cleaned.trim_end_matches('Z');
    for fmt in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_only, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    debug!(date = %date_str, "Unrecognized date format");
    None
}
