//! Instant parsing and canonical formatting
//!
//! All instants handled by the engine are absolute. Strings without an
//! explicit offset are rejected rather than guessed at.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Parse an RFC 3339 timestamp with an explicit offset into UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim()).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Parse an all-day `YYYY-MM-DD` date as midnight UTC.
pub fn parse_all_day(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Canonical UTC form, e.g. `2026-02-17T00:00:00Z`.
pub fn to_iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
