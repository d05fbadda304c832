//! Time slot repository.
//!
//! One slot per (talk, schedule). The merge upserts room, visibility,
//! start, and end on every run; slots are never deleted by the pipeline.
//! Freezing a release copies the working slots into the frozen schedule.

use chrono::NaiveDateTime;
use frab_core::entities::TimeSlot;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{format_naive_datetime, get_opt_string, parse_naive_datetime};

fn row_to_slot(row: &libsql::Row) -> Result<TimeSlot, DatabaseError> {
    Ok(TimeSlot {
        id: row.get::<String>(0)?,
        talk_id: row.get::<String>(1)?,
        schedule_id: row.get::<String>(2)?,
        room_id: get_opt_string(row, 3)?,
        start: parse_naive_datetime(&row.get::<String>(4)?)?,
        end: parse_naive_datetime(&row.get::<String>(5)?)?,
        is_visible: row.get::<i64>(6)? != 0,
    })
}

const SLOT_COLUMNS: &str = "id, talk_id, schedule_id, room_id, start_at, end_at, is_visible";

/// Upsert the slot for (talk, schedule): create it visible, or update
/// room, start, end, and visibility in place.
///
/// # Errors
///
/// Returns `DatabaseError` if the upsert fails.
pub async fn upsert(
    conn: &libsql::Connection,
    talk_id: &str,
    schedule_id: &str,
    room_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<TimeSlot, DatabaseError> {
    let id = generate_id(conn, "slt").await?;
    conn.execute(
        "INSERT INTO slots (id, talk_id, schedule_id, room_id, start_at, end_at, is_visible)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
         ON CONFLICT(talk_id, schedule_id) DO UPDATE SET
           room_id = ?4, start_at = ?5, end_at = ?6, is_visible = 1",
        libsql::params![
            id.as_str(),
            talk_id,
            schedule_id,
            room_id,
            format_naive_datetime(start),
            format_naive_datetime(end)
        ],
    )
    .await?;
    get(conn, talk_id, schedule_id)
        .await?
        .ok_or(DatabaseError::NoResult)
}

/// The slot for (talk, schedule), if one exists.
pub async fn get(
    conn: &libsql::Connection,
    talk_id: &str,
    schedule_id: &str,
) -> Result<Option<TimeSlot>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SLOT_COLUMNS} FROM slots WHERE talk_id = ?1 AND schedule_id = ?2"
            ),
            libsql::params![talk_id, schedule_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_slot(&row)?)),
        None => Ok(None),
    }
}

/// All slots in a schedule, ordered by start.
pub async fn list_for_schedule(
    conn: &libsql::Connection,
    schedule_id: &str,
) -> Result<Vec<TimeSlot>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SLOT_COLUMNS} FROM slots WHERE schedule_id = ?1 ORDER BY start_at"
            ),
            [schedule_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_slot(&row)?);
    }
    Ok(results)
}

/// Copy every slot of `from_schedule_id` into `to_schedule_id`, marked
/// visible. Used when freezing a release: the frozen schedule gets an
/// immutable snapshot while the working slots stay in place.
///
/// # Errors
///
/// Returns `DatabaseError` if any copy fails.
pub async fn copy_to_schedule(
    conn: &libsql::Connection,
    from_schedule_id: &str,
    to_schedule_id: &str,
) -> Result<usize, DatabaseError> {
    let slots = list_for_schedule(conn, from_schedule_id).await?;
    for slot in &slots {
        let id = generate_id(conn, "slt").await?;
        conn.execute(
            "INSERT INTO slots (id, talk_id, schedule_id, room_id, start_at, end_at, is_visible)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)",
            libsql::params![
                id.as_str(),
                slot.talk_id.as_str(),
                to_schedule_id,
                slot.room_id.as_deref(),
                format_naive_datetime(slot.start),
                format_naive_datetime(slot.end)
            ],
        )
        .await?;
    }
    Ok(slots.len())
}

/// The [earliest start, latest end] range over a schedule's slots.
pub async fn date_range(
    conn: &libsql::Connection,
    schedule_id: &str,
) -> Result<Option<(NaiveDateTime, NaiveDateTime)>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT MIN(start_at), MAX(end_at) FROM slots WHERE schedule_id = ?1",
            [schedule_id],
        )
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    let (Some(min), Some(max)) = (get_opt_string(&row, 0)?, get_opt_string(&row, 1)?) else {
        return Ok(None);
    };
    Ok(Some((parse_naive_datetime(&min)?, parse_naive_datetime(&max)?)))
}
