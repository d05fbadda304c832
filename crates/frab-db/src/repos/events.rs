//! Managed event repository.

use chrono::{DateTime, NaiveDate, Utc};
use frab_core::entities::Event;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_date, parse_optional_datetime};
use crate::generate_id;

fn row_to_event(row: &libsql::Row) -> Result<Event, DatabaseError> {
    let date_from = get_opt_string(row, 3)?;
    let date_to = get_opt_string(row, 4)?;
    let last_sync = get_opt_string(row, 7)?;
    Ok(Event {
        id: row.get::<String>(0)?,
        slug: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        date_from: parse_optional_date(date_from.as_deref())?,
        date_to: parse_optional_date(date_to.as_deref())?,
        upstream_url: get_opt_string(row, 5)?,
        sync_interval_minutes: row.get::<Option<i64>>(6)?,
        last_sync: parse_optional_datetime(last_sync.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

const EVENT_COLUMNS: &str = "id, slug, name, date_from, date_to, upstream_url, \
                             sync_interval_minutes, last_sync, created_at";

/// Create a managed event.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails (e.g., duplicate slug).
pub async fn create(
    conn: &libsql::Connection,
    slug: &str,
    name: &str,
    upstream_url: Option<&str>,
    sync_interval_minutes: Option<i64>,
) -> Result<Event, DatabaseError> {
    let id = generate_id(conn, "evt").await?;
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO events (id, slug, name, upstream_url, sync_interval_minutes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            id.as_str(),
            slug,
            name,
            upstream_url,
            sync_interval_minutes,
            created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(Event {
        id,
        slug: slug.to_string(),
        name: name.to_string(),
        date_from: None,
        date_to: None,
        upstream_url: upstream_url.map(ToString::to_string),
        sync_interval_minutes,
        last_sync: None,
        created_at,
    })
}

/// Look up an event by its slug.
pub async fn get_by_slug(
    conn: &libsql::Connection,
    slug: &str,
) -> Result<Option<Event>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE slug = ?1"),
            [slug],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_event(&row)?)),
        None => Ok(None),
    }
}

/// List all managed events, ordered by slug.
pub async fn list(conn: &libsql::Connection) -> Result<Vec<Event>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY slug"),
            (),
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_event(&row)?);
    }
    Ok(results)
}

/// List events with a non-empty upstream URL — the set the periodic
/// trigger considers for syncing.
pub async fn list_syncable(conn: &libsql::Connection) -> Result<Vec<Event>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE upstream_url IS NOT NULL AND upstream_url != ''
                 ORDER BY slug"
            ),
            (),
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_event(&row)?);
    }
    Ok(results)
}

/// Set or replace the upstream configuration for an event.
pub async fn set_upstream(
    conn: &libsql::Connection,
    event_id: &str,
    upstream_url: &str,
    sync_interval_minutes: Option<i64>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE events SET upstream_url = ?2, sync_interval_minutes = ?3 WHERE id = ?1",
        libsql::params![event_id, upstream_url, sync_interval_minutes],
    )
    .await?;
    Ok(())
}

/// Record the time of the most recent sync attempt that saw current data.
pub async fn touch_last_sync(
    conn: &libsql::Connection,
    event_id: &str,
    at: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE events SET last_sync = ?2 WHERE id = ?1",
        libsql::params![event_id, at.to_rfc3339()],
    )
    .await?;
    Ok(())
}

/// Persist the event's overall date range, recomputed from released slots.
pub async fn set_date_range(
    conn: &libsql::Connection,
    event_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE events SET date_from = ?2, date_to = ?3 WHERE id = ?1",
        libsql::params![
            event_id,
            date_from.format("%Y-%m-%d").to_string(),
            date_to.format("%Y-%m-%d").to_string()
        ],
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn create_and_get_by_slug() {
        let db = test_db().await;
        let event = create(db.conn(), "rustconf", "RustConf", None, Some(15))
            .await
            .unwrap();

        let fetched = get_by_slug(db.conn(), "rustconf").await.unwrap().unwrap();
        assert_eq!(fetched.id, event.id);
        assert_eq!(fetched.name, "RustConf");
        assert_eq!(fetched.sync_interval_minutes, Some(15));
        assert!(fetched.upstream_url.is_none());
        assert!(fetched.last_sync.is_none());
    }

    #[tokio::test]
    async fn duplicate_slug_rejected() {
        let db = test_db().await;
        create(db.conn(), "demo", "Demo", None, None).await.unwrap();
        let result = create(db.conn(), "demo", "Demo Again", None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn list_syncable_filters_unconfigured() {
        let db = test_db().await;
        create(db.conn(), "a", "A", Some("https://a.example/x.xml"), None)
            .await
            .unwrap();
        create(db.conn(), "b", "B", None, None).await.unwrap();
        create(db.conn(), "c", "C", Some(""), None).await.unwrap();

        let syncable = list_syncable(db.conn()).await.unwrap();
        assert_eq!(syncable.len(), 1);
        assert_eq!(syncable[0].slug, "a");
    }

    #[tokio::test]
    async fn touch_last_sync_updates_timestamp() {
        let db = test_db().await;
        let event = create(db.conn(), "demo", "Demo", None, None).await.unwrap();
        let now = Utc::now();
        touch_last_sync(db.conn(), &event.id, now).await.unwrap();

        let fetched = get_by_slug(db.conn(), "demo").await.unwrap().unwrap();
        assert_eq!(
            fetched.last_sync.unwrap().timestamp(),
            now.timestamp()
        );
    }

    #[tokio::test]
    async fn set_date_range_persists() {
        let db = test_db().await;
        let event = create(db.conn(), "demo", "Demo", None, None).await.unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        set_date_range(db.conn(), &event.id, from, to).await.unwrap();

        let fetched = get_by_slug(db.conn(), "demo").await.unwrap().unwrap();
        assert_eq!(fetched.date_from, Some(from));
        assert_eq!(fetched.date_to, Some(to));
    }

    #[tokio::test]
    async fn set_upstream_replaces_config() {
        let db = test_db().await;
        let event = create(db.conn(), "demo", "Demo", None, None).await.unwrap();
        set_upstream(db.conn(), &event.id, "https://up.example/s.xml", Some(10))
            .await
            .unwrap();

        let fetched = get_by_slug(db.conn(), "demo").await.unwrap().unwrap();
        assert_eq!(
            fetched.upstream_url.as_deref(),
            Some("https://up.example/s.xml")
        );
        assert_eq!(fetched.sync_interval_minutes, Some(10));
    }
}
