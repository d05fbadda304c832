//! Schedule version repository.
//!
//! Each event has at most one working schedule (`version NULL`, created
//! lazily) and any number of frozen releases, each tagged with the upstream
//! version string.

use chrono::{DateTime, Utc};
use frab_core::entities::Schedule;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, parse_optional_datetime};

fn row_to_schedule(row: &libsql::Row) -> Result<Schedule, DatabaseError> {
    let frozen_at = get_opt_string(row, 3)?;
    Ok(Schedule {
        id: row.get::<String>(0)?,
        event_id: row.get::<String>(1)?,
        version: get_opt_string(row, 2)?,
        frozen_at: parse_optional_datetime(frozen_at.as_deref())?,
    })
}

/// Get the event's working schedule, creating it on first touch.
///
/// # Errors
///
/// Returns `DatabaseError` if the lookup or insert fails.
pub async fn working(
    conn: &libsql::Connection,
    event_id: &str,
) -> Result<Schedule, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, event_id, version, frozen_at FROM schedules
             WHERE event_id = ?1 AND version IS NULL",
            [event_id],
        )
        .await?;
    if let Some(row) = rows.next().await? {
        return row_to_schedule(&row);
    }

    let id = generate_id(conn, "sch").await?;
    conn.execute(
        "INSERT INTO schedules (id, event_id, version) VALUES (?1, ?2, NULL)",
        libsql::params![id.as_str(), event_id],
    )
    .await?;
    Ok(Schedule {
        id,
        event_id: event_id.to_string(),
        version: None,
        frozen_at: None,
    })
}

/// The most recently frozen release for an event, if any.
pub async fn latest_frozen(
    conn: &libsql::Connection,
    event_id: &str,
) -> Result<Option<Schedule>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, event_id, version, frozen_at FROM schedules
             WHERE event_id = ?1 AND version IS NOT NULL
             ORDER BY frozen_at DESC, id DESC LIMIT 1",
            [event_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_schedule(&row)?)),
        None => Ok(None),
    }
}

/// Look up a frozen release by its version string.
pub async fn get_by_version(
    conn: &libsql::Connection,
    event_id: &str,
    version: &str,
) -> Result<Option<Schedule>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, event_id, version, frozen_at FROM schedules
             WHERE event_id = ?1 AND version = ?2",
            libsql::params![event_id, version],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_schedule(&row)?)),
        None => Ok(None),
    }
}

/// Insert a frozen release row tagged with `version`.
///
/// The UNIQUE(event_id, version) constraint turns a duplicate version into
/// an error — the releaser maps that to its release-failure case. The
/// caller is responsible for copying slots into the new release.
///
/// # Errors
///
/// Returns `DatabaseError::Constraint` on a version collision, or another
/// `DatabaseError` if the insert fails.
pub async fn freeze(
    conn: &libsql::Connection,
    event_id: &str,
    version: &str,
    frozen_at: DateTime<Utc>,
) -> Result<Schedule, DatabaseError> {
    let id = generate_id(conn, "sch").await?;
    conn.execute(
        "INSERT INTO schedules (id, event_id, version, frozen_at) VALUES (?1, ?2, ?3, ?4)",
        libsql::params![id.as_str(), event_id, version, frozen_at.to_rfc3339()],
    )
    .await
    .map_err(|e| match e {
        libsql::Error::SqliteFailure(_, ref msg) if msg.contains("UNIQUE") => {
            DatabaseError::Constraint(format!("schedule version '{version}' already exists"))
        }
        other => DatabaseError::LibSql(other),
    })?;
    Ok(Schedule {
        id,
        event_id: event_id.to_string(),
        version: Some(version.to_string()),
        frozen_at: Some(frozen_at),
    })
}
