//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed
//! entity structs. These helpers isolate the parsing logic and handle the
//! dual datetime format issue (`SQLite`'s `datetime('now')` vs Rust's
//! `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a naive wall-clock TEXT column (`"2024-01-01 09:00:00"`), the
/// format slot start/end times are stored in.
///
/// # Errors
///
/// Returns `DatabaseError::Query` on malformed input.
pub fn parse_naive_datetime(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse timestamp '{s}': {e}")))
}

/// Format a naive wall-clock timestamp for storage.
#[must_use]
pub fn format_naive_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse an optional TEXT column as `Option<NaiveDate>` (`"2024-01-01"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not an ISO date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-02-09T14:30:00+00:00");
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-02-09T14:30:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("not a date").is_err());
    }

    #[test]
    fn naive_roundtrip() {
        let dt = parse_naive_datetime("2024-01-01 09:00:00").unwrap();
        assert_eq!(format_naive_datetime(dt), "2024-01-01 09:00:00");
    }

    #[test]
    fn optional_date_empty_is_none() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2024-01-03")).unwrap(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
        );
    }
}
