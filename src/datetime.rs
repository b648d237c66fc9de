//! Date/time utilities for Vidshelf.

use chrono::NaiveDateTime;
use serde::Serializer;

/// Timestamp layout used by the database and by every API response.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` (24-hour clock, no fraction).
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a database datetime string (`YYYY-MM-DD HH:MM:SS`).
///
/// Returns `None` if the string is not in that layout.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Serde `serialize_with` adapter for [`format_timestamp`].
pub fn serialize_timestamp<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(dt))
}
