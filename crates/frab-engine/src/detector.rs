//! Content change detection.
//!
//! A refresh fingerprints the raw document bytes and compares against the
//! checksum stored with the event's most recent refresh result. An
//! unchanged document short-circuits the run before parsing: only the
//! event's last-sync timestamp moves.

use frab_db::error::DatabaseError;
use frab_db::repos::refresh_results;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the raw document bytes.
#[must_use]
pub fn fingerprint(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Whether `checksum` matches the checksum of the newest stored refresh
/// result for the event. No stored result means changed.
///
/// # Errors
///
/// Returns `DatabaseError` if the lookup fails.
pub async fn is_unchanged(
    conn: &libsql::Connection,
    event_id: &str,
    checksum: &str,
) -> Result<bool, DatabaseError> {
    let latest = refresh_results::latest_for_event(conn, event_id).await?;
    Ok(latest.is_some_and(|r| r.checksum == checksum))
}
