//! Submission type repository.
//!
//! Types are identified by (event, name, default duration). A lookup that
//! misses on either name or duration mints a new type — durations are never
//! merged into existing types.

use frab_core::entities::SubmissionType;

use crate::error::DatabaseError;
use crate::generate_id;

fn row_to_type(row: &libsql::Row) -> Result<SubmissionType, DatabaseError> {
    Ok(SubmissionType {
        id: row.get::<String>(0)?,
        event_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        default_duration: row.get::<i64>(3)?,
    })
}

/// Find a type by exact (name, duration) match within an event.
pub async fn find(
    conn: &libsql::Connection,
    event_id: &str,
    name: &str,
    default_duration: i64,
) -> Result<Option<SubmissionType>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, event_id, name, default_duration FROM submission_types
             WHERE event_id = ?1 AND name = ?2 AND default_duration = ?3",
            libsql::params![event_id, name, default_duration],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_type(&row)?)),
        None => Ok(None),
    }
}

/// Create a new submission type.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails.
pub async fn create(
    conn: &libsql::Connection,
    event_id: &str,
    name: &str,
    default_duration: i64,
) -> Result<SubmissionType, DatabaseError> {
    let id = generate_id(conn, "sty").await?;
    conn.execute(
        "INSERT INTO submission_types (id, event_id, name, default_duration)
         VALUES (?1, ?2, ?3, ?4)",
        libsql::params![id.as_str(), event_id, name, default_duration],
    )
    .await?;
    Ok(SubmissionType {
        id,
        event_id: event_id.to_string(),
        name: name.to_string(),
        default_duration,
    })
}
