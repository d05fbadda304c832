//! The refresh pipeline.
//!
//! One run: fingerprint the fetched document, short-circuit when unchanged,
//! otherwise parse it, and apply the merge, conditional release, and audit
//! record inside a single transaction. A failure anywhere after the parse
//! rolls the whole run back, so storage only ever shows complete runs.

use chrono::Utc;
use frab_client::{ParseError, UpstreamClient};
use frab_config::ConfigError;
use frab_core::change::ChangeMap;
use frab_core::entities::{Event, RefreshResult, Schedule};
use frab_db::FrabDb;
use frab_db::error::DatabaseError;
use frab_db::repos::{events, refresh_results, schedules};

use crate::error::SyncError;
use crate::resolver::CodeResolution;
use crate::{detector, merger, releaser, resolver};

/// What one refresh run did.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// The stored audit record; `None` when the document was unchanged and
    /// the run short-circuited.
    pub result: Option<RefreshResult>,
    /// The schedule version released by this run, if any.
    pub released: Option<Schedule>,
}

impl RefreshOutcome {
    /// Whether the run short-circuited on an unchanged document.
    #[must_use]
    pub const fn unchanged(&self) -> bool {
        self.result.is_none()
    }
}

/// Refresh the event named by `slug`.
///
/// # Errors
///
/// Returns [`SyncError::EventNotFound`] for an unknown slug, otherwise any
/// error from [`refresh_event`].
pub async fn refresh_by_slug(
    client: &UpstreamClient,
    db: &FrabDb,
    slug: &str,
) -> Result<RefreshOutcome, SyncError> {
    let event = events::get_by_slug(db.conn(), slug)
        .await?
        .ok_or_else(|| SyncError::EventNotFound(slug.to_string()))?;
    refresh_event(client, db, &event).await
}

/// Fetch the event's upstream document and run [`sync_event`] on it.
///
/// # Errors
///
/// Returns [`SyncError::Config`] when the event has no upstream URL, a
/// fetch error when upstream is unreachable, or any error from the sync.
pub async fn refresh_event(
    client: &UpstreamClient,
    db: &FrabDb,
    event: &Event,
) -> Result<RefreshOutcome, SyncError> {
    let url = event
        .upstream_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            SyncError::Config(ConfigError::InvalidValue {
                field: format!("events.{}.upstream_url", event.slug),
                reason: "no upstream URL configured".to_string(),
            })
        })?;
    let content = client.fetch(url).await?;
    sync_event(db, event, &content).await
}

/// Run the pipeline on already-fetched document bytes.
///
/// # Errors
///
/// Returns [`SyncError::Malformed`] on a bad document (nothing persisted),
/// [`SyncError::ReleaseFailed`] on a version revert (the run rolls back),
/// or [`SyncError::Database`] on storage failure.
pub async fn sync_event(
    db: &FrabDb,
    event: &Event,
    content: &[u8],
) -> Result<RefreshOutcome, SyncError> {
    let checksum = detector::fingerprint(content);
    if detector::is_unchanged(db.conn(), &event.id, &checksum).await? {
        tracing::debug!(event = %event.slug, "document unchanged, skipping");
        events::touch_last_sync(db.conn(), &event.id, Utc::now()).await?;
        return Ok(RefreshOutcome {
            result: None,
            released: None,
        });
    }

    // Parse before opening the transaction: a malformed document must
    // leave no trace, not even a rolled-back transaction.
    let text =
        std::str::from_utf8(content).map_err(|_| SyncError::Malformed(ParseError::Encoding))?;
    let parsed = frab_client::parse_str(text)?;

    let tx = db
        .conn()
        .transaction()
        .await
        .map_err(DatabaseError::from)?;
    match apply(&tx, event, text, &checksum, &parsed).await {
        Ok(outcome) => {
            tx.commit().await.map_err(DatabaseError::from)?;
            Ok(outcome)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(event = %event.slug, error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

/// The transactional body of a run: merge every resolvable talk, release
/// if the version is new, and append the audit record.
async fn apply(
    conn: &libsql::Connection,
    event: &Event,
    text: &str,
    checksum: &str,
    parsed: &frab_client::ParsedSchedule,
) -> Result<RefreshOutcome, SyncError> {
    let working = schedules::working(conn, &event.id).await?;

    let mut change_map = ChangeMap::new();
    for (room_name, talk) in parsed.room_talks() {
        match resolver::resolve_code(conn, &event.id, &talk.id, &talk.guid).await? {
            CodeResolution::Resolved(code) => {
                let changes =
                    merger::merge_talk(conn, &event.id, &working.id, room_name, &code, talk)
                        .await?;
                if let Some(changes) = changes {
                    if !changes.is_empty() {
                        change_map.insert(code, changes);
                    }
                }
            }
            CodeResolution::Ambiguous { id, guid } => {
                tracing::warn!(
                    event = %event.slug,
                    id,
                    guid,
                    "talk identity collides with other events, skipping"
                );
            }
        }
    }

    let released = releaser::release_if_pending(conn, event, &working.id, &parsed.version).await?;

    let changes_json =
        serde_json::to_string(&change_map).map_err(|e| DatabaseError::Other(e.into()))?;
    let now = Utc::now();
    let result = refresh_results::insert(
        conn,
        &event.id,
        released.as_ref().map(|s| s.id.as_str()),
        text,
        checksum,
        &changes_json,
        now,
    )
    .await?;
    events::touch_last_sync(conn, &event.id, now).await?;

    tracing::info!(
        event = %event.slug,
        version = parsed.version,
        changed_talks = change_map.len(),
        released = released.is_some(),
        "refresh complete"
    );
    Ok(RefreshOutcome {
        result: Some(result),
        released,
    })
}
