//! Room repository. Rooms are identified by (event, name) and are only
//! ever created — the pipeline never deletes or renames them.

use frab_core::entities::Room;

use crate::error::DatabaseError;
use crate::generate_id;

fn row_to_room(row: &libsql::Row) -> Result<Room, DatabaseError> {
    Ok(Room {
        id: row.get::<String>(0)?,
        event_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
    })
}

/// Find a room by exact name within an event, creating it if absent.
///
/// # Errors
///
/// Returns `DatabaseError` if the lookup or insert fails.
pub async fn get_or_create(
    conn: &libsql::Connection,
    event_id: &str,
    name: &str,
) -> Result<Room, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, event_id, name FROM rooms WHERE event_id = ?1 AND name = ?2",
            libsql::params![event_id, name],
        )
        .await?;
    if let Some(row) = rows.next().await? {
        return row_to_room(&row);
    }

    let id = generate_id(conn, "room").await?;
    conn.execute(
        "INSERT INTO rooms (id, event_id, name) VALUES (?1, ?2, ?3)",
        libsql::params![id.as_str(), event_id, name],
    )
    .await?;
    Ok(Room {
        id,
        event_id: event_id.to_string(),
        name: name.to_string(),
    })
}
