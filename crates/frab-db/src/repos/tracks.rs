//! Track repository.
//!
//! Track lookup is tolerant: the candidate set is every track whose name
//! contains the upstream name as a case-insensitive substring; the resolver
//! narrows that to exact equality.

use frab_core::entities::Track;

use crate::error::DatabaseError;
use crate::generate_id;

fn row_to_track(row: &libsql::Row) -> Result<Track, DatabaseError> {
    Ok(Track {
        id: row.get::<String>(0)?,
        event_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
    })
}

/// All tracks in the event whose name contains `name` as a
/// case-insensitive substring.
pub async fn find_containing(
    conn: &libsql::Connection,
    event_id: &str,
    name: &str,
) -> Result<Vec<Track>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, event_id, name FROM tracks
             WHERE event_id = ?1 AND instr(lower(name), lower(?2)) > 0",
            libsql::params![event_id, name],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_track(&row)?);
    }
    Ok(results)
}

/// Create a new track.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails.
pub async fn create(
    conn: &libsql::Connection,
    event_id: &str,
    name: &str,
) -> Result<Track, DatabaseError> {
    let id = generate_id(conn, "trk").await?;
    conn.execute(
        "INSERT INTO tracks (id, event_id, name) VALUES (?1, ?2, ?3)",
        libsql::params![id.as_str(), event_id, name],
    )
    .await?;
    Ok(Track {
        id,
        event_id: event_id.to_string(),
        name: name.to_string(),
    })
}
