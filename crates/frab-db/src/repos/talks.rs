//! Talk repository.
//!
//! Talk identity is the code column (case-insensitive, unique per event).
//! The resolver needs both event-scoped and global lookups: the global one
//! backs the cross-event collision check during code resolution.

use frab_core::entities::Talk;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, parse_datetime};

fn row_to_talk(row: &libsql::Row) -> Result<Talk, DatabaseError> {
    Ok(Talk {
        id: row.get::<String>(0)?,
        event_id: row.get::<String>(1)?,
        code: row.get::<String>(2)?,
        submission_type_id: row.get::<String>(3)?,
        track_id: get_opt_string(row, 4)?,
        title: get_opt_string(row, 5)?,
        description: get_opt_string(row, 6)?,
        abstract_text: get_opt_string(row, 7)?,
        content_locale: row.get::<String>(8)?,
        do_not_record: row.get::<i64>(9)? != 0,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

const TALK_COLUMNS: &str = "id, event_id, code, submission_type_id, track_id, title, \
                            description, abstract, content_locale, do_not_record, created_at";

/// Find a talk by code within an event (case-insensitive).
pub async fn find_by_code(
    conn: &libsql::Connection,
    event_id: &str,
    code: &str,
) -> Result<Option<Talk>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {TALK_COLUMNS} FROM talks WHERE event_id = ?1 AND code = ?2"),
            libsql::params![event_id, code],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_talk(&row)?)),
        None => Ok(None),
    }
}

/// Whether any talk in any event carries this code.
pub async fn code_exists_anywhere(
    conn: &libsql::Connection,
    code: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM talks WHERE code = ?1 LIMIT 1", [code])
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Get the talk with this code in the event, creating it with the given
/// submission type as the only creation default. Returns the talk and
/// whether it was created by this call.
///
/// # Errors
///
/// Returns `DatabaseError` if the lookup or insert fails.
pub async fn get_or_create(
    conn: &libsql::Connection,
    event_id: &str,
    code: &str,
    submission_type_id: &str,
) -> Result<(Talk, bool), DatabaseError> {
    if let Some(talk) = find_by_code(conn, event_id, code).await? {
        return Ok((talk, false));
    }

    let id = generate_id(conn, "tlk").await?;
    conn.execute(
        "INSERT INTO talks (id, event_id, code, submission_type_id) VALUES (?1, ?2, ?3, ?4)",
        libsql::params![id.as_str(), event_id, code, submission_type_id],
    )
    .await?;
    let talk = find_by_code(conn, event_id, code)
        .await?
        .ok_or(DatabaseError::NoResult)?;
    Ok((talk, true))
}

/// Overwrite the merge-managed columns of a talk.
///
/// Type and track are reassigned unconditionally on every run; the content
/// fields carry whatever the merger decided after diffing.
#[allow(clippy::too_many_arguments)]
pub async fn update_merged_fields(
    conn: &libsql::Connection,
    talk_id: &str,
    submission_type_id: &str,
    track_id: &str,
    title: Option<&str>,
    description: Option<&str>,
    abstract_text: Option<&str>,
    content_locale: &str,
    do_not_record: bool,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE talks SET submission_type_id = ?2, track_id = ?3, title = ?4,
             description = ?5, abstract = ?6, content_locale = ?7, do_not_record = ?8
         WHERE id = ?1",
        libsql::params![
            talk_id,
            submission_type_id,
            track_id,
            title,
            description,
            abstract_text,
            content_locale,
            do_not_record
        ],
    )
    .await?;
    Ok(())
}
