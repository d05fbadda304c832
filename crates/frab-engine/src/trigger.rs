//! Periodic sync trigger.
//!
//! The daemon ticks on a fixed cadence, collects every syncable event
//! whose interval has elapsed since its last sync, and refreshes them one
//! at a time. Runs serialize on the single storage connection, so one
//! event's transaction never interleaves with another's. Per-event
//! failures are logged and never stop the loop.

use std::time::Duration;

use chrono::{DateTime, Utc};
use frab_client::UpstreamClient;
use frab_config::SyncConfig;
use frab_core::entities::Event;
use frab_db::FrabDb;
use frab_db::repos::events;

use crate::error::SyncError;
use crate::refresh;

/// Whether the event's sync interval has elapsed. An event that has never
/// synced is always due.
#[must_use]
pub fn is_due(event: &Event, default_interval_minutes: i64, now: DateTime<Utc>) -> bool {
    let interval = match event.sync_interval_minutes {
        Some(minutes) if minutes > 0 => minutes,
        _ => default_interval_minutes,
    };
    match event.last_sync {
        None => true,
        Some(last) => now - last > chrono::Duration::minutes(interval),
    }
}

/// Refresh every due event once. Returns how many were due; individual
/// refresh failures are logged, not propagated.
///
/// # Errors
///
/// Returns `SyncError` only when the event listing itself fails.
pub async fn tick(
    db: &FrabDb,
    client: &UpstreamClient,
    default_interval_minutes: i64,
) -> Result<usize, SyncError> {
    let candidates = events::list_syncable(db.conn()).await?;
    let now = Utc::now();
    let due: Vec<Event> = candidates
        .into_iter()
        .filter(|e| is_due(e, default_interval_minutes, now))
        .collect();

    for event in &due {
        if let Err(e) = refresh::refresh_event(client, db, event).await {
            tracing::error!(event = %event.slug, error = %e, "scheduled refresh failed");
        }
    }
    Ok(due.len())
}

/// Run the trigger loop until the process exits.
pub async fn run(db: &FrabDb, client: &UpstreamClient, config: &SyncConfig) {
    let mut ticker = tokio::time::interval(Duration::from_secs(config.tick_secs));
    tracing::info!(tick_secs = config.tick_secs, "sync trigger started");
    loop {
        ticker.tick().await;
        match tick(db, client, config.default_interval_minutes).await {
            Ok(0) => {}
            Ok(due) => tracing::debug!(due, "trigger tick"),
            Err(e) => tracing::error!(error = %e, "trigger tick failed"),
        }
    }
}
