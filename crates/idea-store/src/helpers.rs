//! Row and column parsing helpers shared by the stores.
//!
//! The remote store keeps timestamps as fixed-width RFC 3339 text so that
//! `ORDER BY updated_at` sorts chronologically; these helpers handle that
//! format, `SQLite`'s `datetime('now')` default, and lenient JSON columns.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Format a timestamp for a TEXT column: UTC, microsecond precision, `Z` suffix.
///
/// Fixed width keeps lexicographic and chronological order identical.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse a JSON TEXT column leniently.
///
/// NULL, empty, and invalid JSON all become `Value::Null`, which the
/// normalization coercers turn into empty sequences.
#[must_use]
pub fn parse_json_lenient(s: Option<&str>) -> serde_json::Value {
    match s {
        Some(s) if !s.is_empty() => serde_json::from_str(s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid JSON in column; treating as empty");
            serde_json::Value::Null
        }),
        _ => serde_json::Value::Null,
    }
}
