//! Entity resolution.
//!
//! Maps upstream identifiers and names onto stored entities. Talk identity
//! is the interesting case: the upstream numeric id is preferred as the
//! stored code, but only when it does not collide with a talk in another
//! event; the guid prefix is the fallback under the same rule. When both
//! candidates collide the talk is unresolvable and the caller skips it.

use frab_db::error::DatabaseError;
use frab_db::repos::{submission_types, talks, tracks};
use frab_core::entities::{SubmissionType, Track};

/// Length of the guid prefix used as the fallback talk code.
const GUID_CODE_LEN: usize = 16;

/// Name used when upstream supplies an empty track or type name.
const DEFAULT_NAME: &str = "default";

/// Outcome of talk code resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeResolution {
    /// The code to store the talk under.
    Resolved(String),
    /// Both identity candidates collide with talks in other events.
    Ambiguous { id: String, guid: String },
}

/// A candidate code is usable when it already names a talk in this event,
/// or when no talk anywhere carries it. A code held only by another
/// event's talk is a collision.
async fn code_usable(
    conn: &libsql::Connection,
    event_id: &str,
    code: &str,
) -> Result<bool, DatabaseError> {
    if talks::find_by_code(conn, event_id, code).await?.is_some() {
        return Ok(true);
    }
    Ok(!talks::code_exists_anywhere(conn, code).await?)
}

/// Resolve the stored code for an upstream talk: the id first, the guid
/// prefix second.
///
/// # Errors
///
/// Returns `DatabaseError` if a lookup fails.
pub async fn resolve_code(
    conn: &libsql::Connection,
    event_id: &str,
    id: &str,
    guid: &str,
) -> Result<CodeResolution, DatabaseError> {
    if code_usable(conn, event_id, id).await? {
        return Ok(CodeResolution::Resolved(id.to_string()));
    }

    let guid_code = guid.get(..GUID_CODE_LEN).unwrap_or(guid);
    if code_usable(conn, event_id, guid_code).await? {
        return Ok(CodeResolution::Resolved(guid_code.to_string()));
    }

    Ok(CodeResolution::Ambiguous {
        id: id.to_string(),
        guid: guid.to_string(),
    })
}

/// Resolve the submission type for (name, duration), minting one when no
/// exact pair exists. An empty upstream name resolves under the fixed
/// default name.
///
/// # Errors
///
/// Returns `DatabaseError` if a lookup or insert fails.
pub async fn resolve_submission_type(
    conn: &libsql::Connection,
    event_id: &str,
    upstream_name: &str,
    default_duration: i64,
) -> Result<SubmissionType, DatabaseError> {
    let name = effective_name(upstream_name);
    match submission_types::find(conn, event_id, name, default_duration).await? {
        Some(existing) => Ok(existing),
        None => submission_types::create(conn, event_id, name, default_duration).await,
    }
}

fn effective_name(upstream_name: &str) -> &str {
    if upstream_name.is_empty() {
        DEFAULT_NAME
    } else {
        upstream_name
    }
}

/// Resolve a track by name. An empty upstream name resolves under the
/// fixed default name, so repeated runs reuse one default track. Matching
/// is exact among case-insensitive substring candidates; no match mints a
/// new track.
///
/// # Errors
///
/// Returns `DatabaseError` if a lookup or insert fails.
pub async fn resolve_track(
    conn: &libsql::Connection,
    event_id: &str,
    upstream_name: &str,
) -> Result<Track, DatabaseError> {
    let name = effective_name(upstream_name);
    let candidates = tracks::find_containing(conn, event_id, name).await?;
    if let Some(exact) = candidates.into_iter().find(|t| t.name == name) {
        return Ok(exact);
    }
    tracks::create(conn, event_id, name).await
}
