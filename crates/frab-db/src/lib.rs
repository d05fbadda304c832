//! # frab-db
//!
//! libSQL storage layer for frabsync schedule state.
//!
//! Handles all relational state: managed events, schedule versions, rooms,
//! submission types, tracks, talks, speakers, slots, and the append-only
//! refresh audit log.
//!
//! Repository functions (in [`repos`]) take a `&libsql::Connection` rather
//! than a database handle, so the same code runs on a plain connection or
//! inside a `libsql::Transaction` — the refresh pipeline wraps one run's
//! mutations in an explicit transaction and commits or rolls back as a unit.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

#[cfg(test)]
pub(crate) mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all frabsync state operations.
///
/// Wraps a libSQL database and connection, and runs migrations on open.
pub struct FrabDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl FrabDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let frab_db = Self { db, conn };
        frab_db.run_migrations().await?;
        Ok(frab_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

/// Generate a prefixed ID via libSQL. Returns e.g., `"evt-a3f8b2c1"`.
///
/// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the
/// prefix. Takes a connection so it also works inside a transaction.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> FrabDb {
        FrabDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "events",
            "schedules",
            "rooms",
            "submission_types",
            "tracks",
            "talks",
            "speakers",
            "speaker_profiles",
            "talk_speakers",
            "slots",
            "refresh_results",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = generate_id(db.conn(), "evt").await.unwrap();
        assert!(id.starts_with("evt-"), "ID should start with 'evt-': {id}");
        assert_eq!(
            id.len(),
            12,
            "ID should be 12 chars (3 prefix + 1 dash + 8 hex): {id}"
        );

        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = generate_id(db.conn(), "tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again — should not fail
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn working_schedule_unique_per_event() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO events (id, slug, name) VALUES ('evt-1', 'demo', 'Demo')",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO schedules (id, event_id, version) VALUES ('sch-1', 'evt-1', NULL)",
                (),
            )
            .await
            .unwrap();

        // A second NULL-version schedule for the same event must be rejected.
        let result = db
            .conn()
            .execute(
                "INSERT INTO schedules (id, event_id, version) VALUES ('sch-2', 'evt-1', NULL)",
                (),
            )
            .await;
        assert!(result.is_err(), "second working schedule should be rejected");
    }

    #[tokio::test]
    async fn talk_code_unique_within_event() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO events (id, slug, name) VALUES ('evt-1', 'demo', 'Demo')",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO submission_types (id, event_id, name, default_duration)
                 VALUES ('sty-1', 'evt-1', 'talk', 30)",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO talks (id, event_id, code, submission_type_id)
                 VALUES ('tlk-1', 'evt-1', 'ABC', 'sty-1')",
                (),
            )
            .await
            .unwrap();

        // Case-insensitive collation: 'abc' collides with 'ABC'.
        let result = db
            .conn()
            .execute(
                "INSERT INTO talks (id, event_id, code, submission_type_id)
                 VALUES ('tlk-2', 'evt-1', 'abc', 'sty-1')",
                (),
            )
            .await;
        assert!(result.is_err(), "duplicate talk code should be rejected");
    }
}
