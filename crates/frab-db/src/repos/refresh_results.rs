//! Refresh result repository — the append-only audit log.

use chrono::{DateTime, Utc};
use frab_core::entities::RefreshResult;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, parse_datetime};

fn row_to_result(row: &libsql::Row) -> Result<RefreshResult, DatabaseError> {
    Ok(RefreshResult {
        id: row.get::<String>(0)?,
        event_id: row.get::<String>(1)?,
        schedule_id: get_opt_string(row, 2)?,
        content: row.get::<String>(3)?,
        checksum: row.get::<String>(4)?,
        changes: row.get::<String>(5)?,
        timestamp: parse_datetime(&row.get::<String>(6)?)?,
    })
}

const RESULT_COLUMNS: &str = "id, event_id, schedule_id, content, checksum, changes, timestamp";

/// The newest stored result for an event — the one the change detector
/// compares fingerprints against. `id DESC` breaks same-second timestamp
/// ties so back-to-back runs still see the most recent row.
pub async fn latest_for_event(
    conn: &libsql::Connection,
    event_id: &str,
) -> Result<Option<RefreshResult>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {RESULT_COLUMNS} FROM refresh_results
                 WHERE event_id = ?1 ORDER BY timestamp DESC, id DESC LIMIT 1"
            ),
            [event_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_result(&row)?)),
        None => Ok(None),
    }
}

/// Append one audit record. Records are never updated or deleted.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails.
pub async fn insert(
    conn: &libsql::Connection,
    event_id: &str,
    schedule_id: Option<&str>,
    content: &str,
    checksum: &str,
    changes_json: &str,
    timestamp: DateTime<Utc>,
) -> Result<RefreshResult, DatabaseError> {
    let id = generate_id(conn, "ref").await?;
    conn.execute(
        "INSERT INTO refresh_results (id, event_id, schedule_id, content, checksum, changes, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            id.as_str(),
            event_id,
            schedule_id,
            content,
            checksum,
            changes_json,
            timestamp.to_rfc3339()
        ],
    )
    .await?;
    Ok(RefreshResult {
        id,
        event_id: event_id.to_string(),
        schedule_id: schedule_id.map(ToString::to_string),
        content: content.to_string(),
        checksum: checksum.to_string(),
        changes: changes_json.to_string(),
        timestamp,
    })
}

/// Number of stored results for an event.
pub async fn count_for_event(
    conn: &libsql::Connection,
    event_id: &str,
) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM refresh_results WHERE event_id = ?1",
            [event_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_db_with_event;

    #[tokio::test]
    async fn latest_prefers_newest_timestamp() {
        let (db, event) = test_db_with_event().await;
        let t1 = "2024-01-01T10:00:00Z".parse().unwrap();
        let t2 = "2024-01-02T10:00:00Z".parse().unwrap();
        insert(db.conn(), &event.id, None, "<old/>", "aaa", "{}", t1)
            .await
            .unwrap();
        insert(db.conn(), &event.id, None, "<new/>", "bbb", "{}", t2)
            .await
            .unwrap();

        let latest = latest_for_event(db.conn(), &event.id).await.unwrap().unwrap();
        assert_eq!(latest.checksum, "bbb");
    }

    #[tokio::test]
    async fn no_results_yields_none() {
        let (db, event) = test_db_with_event().await;
        assert!(latest_for_event(db.conn(), &event.id).await.unwrap().is_none());
        assert_eq!(count_for_event(db.conn(), &event.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn stores_change_map_and_release_reference() {
        let (db, event) = test_db_with_event().await;
        let frozen = crate::repos::schedules::freeze(db.conn(), &event.id, "1.0", Utc::now())
            .await
            .unwrap();
        let result = insert(
            db.conn(),
            &event.id,
            Some(frozen.id.as_str()),
            "<schedule/>",
            "cafe",
            r#"{"ABC":{"title":{"old":"A","new":"B"}}}"#,
            Utc::now(),
        )
        .await
        .unwrap();

        let fetched = latest_for_event(db.conn(), &event.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, result.id);
        assert_eq!(fetched.schedule_id.as_deref(), Some(frozen.id.as_str()));
        assert!(fetched.changes.contains("title"));
    }
}
