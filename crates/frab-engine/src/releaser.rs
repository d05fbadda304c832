//! Conditional schedule release.
//!
//! A refresh releases when the parsed document's version differs from the
//! event's latest frozen release (or none exists yet). Releasing freezes a
//! new schedule row under the version, snapshots the working slots into
//! it, and recomputes the event's overall date range from the snapshot.

use chrono::Utc;
use frab_core::entities::{Event, Schedule};
use frab_db::error::DatabaseError;
use frab_db::repos::{events, schedules, slots};

use crate::error::SyncError;

/// Release the working schedule under `version` unless that version is
/// already the latest frozen release.
///
/// Returns the frozen schedule, or `None` when the version is current.
///
/// # Errors
///
/// Returns [`SyncError::ReleaseFailed`] when `version` exists but is not
/// the latest release (an upstream version revert), or
/// [`SyncError::Database`] on storage failure.
pub async fn release_if_pending(
    conn: &libsql::Connection,
    event: &Event,
    working_schedule_id: &str,
    version: &str,
) -> Result<Option<Schedule>, SyncError> {
    let latest = schedules::latest_frozen(conn, &event.id).await?;
    if latest.as_ref().and_then(|s| s.version.as_deref()) == Some(version) {
        tracing::debug!(event = %event.slug, version, "version already released");
        return Ok(None);
    }

    let frozen = schedules::freeze(conn, &event.id, version, Utc::now())
        .await
        .map_err(|e| match e {
            DatabaseError::Constraint(_) => SyncError::ReleaseFailed {
                event: event.slug.clone(),
                version: version.to_string(),
            },
            other => SyncError::Database(other),
        })?;

    let copied = slots::copy_to_schedule(conn, working_schedule_id, &frozen.id).await?;
    tracing::info!(event = %event.slug, version, slots = copied, "released schedule version");

    if let Some((min, max)) = slots::date_range(conn, &frozen.id).await? {
        events::set_date_range(conn, &event.id, min.date(), max.date()).await?;
    }

    Ok(Some(frozen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merger;
    use crate::test_support::{parsed_talk, test_db_with_event};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn first_release_freezes_and_sets_date_range() {
        let (db, event) = test_db_with_event().await;
        let working = schedules::working(db.conn(), &event.id).await.unwrap();
        merger::merge_talk(
            db.conn(),
            &event.id,
            &working.id,
            "Hall",
            "123",
            &parsed_talk("123", "Opening"),
        )
        .await
        .unwrap();

        let frozen = release_if_pending(db.conn(), &event, &working.id, "1.0")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(frozen.version.as_deref(), Some("1.0"));

        let snapshot = slots::list_for_schedule(db.conn(), &frozen.id).await.unwrap();
        assert_eq!(snapshot.len(), 1);

        let refreshed = events::get_by_slug(db.conn(), &event.slug)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(refreshed.date_from.unwrap().to_string(), "2024-01-01");
        assert_eq!(refreshed.date_to.unwrap().to_string(), "2024-01-01");
    }

    #[tokio::test]
    async fn current_version_is_not_rereleased() {
        let (db, event) = test_db_with_event().await;
        let working = schedules::working(db.conn(), &event.id).await.unwrap();

        release_if_pending(db.conn(), &event, &working.id, "1.0")
            .await
            .unwrap()
            .unwrap();
        let again = release_if_pending(db.conn(), &event, &working.id, "1.0")
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn version_revert_is_release_failure() {
        let (db, event) = test_db_with_event().await;
        let working = schedules::working(db.conn(), &event.id).await.unwrap();

        release_if_pending(db.conn(), &event, &working.id, "1.0")
            .await
            .unwrap();
        release_if_pending(db.conn(), &event, &working.id, "1.1")
            .await
            .unwrap();

        // Upstream went back to an already-released, non-latest version.
        let err = release_if_pending(db.conn(), &event, &working.id, "1.0")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::ReleaseFailed { ref version, .. } if version == "1.0"
        ));
    }
}
