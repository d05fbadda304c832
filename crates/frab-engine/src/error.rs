//! Pipeline error types.

use frab_client::{FetchError, ParseError};
use frab_config::ConfigError;
use frab_db::error::DatabaseError;
use thiserror::Error;

/// Errors from a single refresh run or from the periodic trigger.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration problem, including an event with no upstream URL.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The upstream fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document was retrieved but could not be parsed. Nothing is
    /// persisted for a malformed document.
    #[error("malformed schedule document: {0}")]
    Malformed(#[from] ParseError),

    /// Freezing a release collided with an already-stored version that is
    /// not the latest one. The whole run rolls back.
    #[error("could not release schedule version '{version}' for event '{event}'")]
    ReleaseFailed { event: String, version: String },

    /// Storage failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// No managed event with the given slug.
    #[error("no event with slug '{0}'")]
    EventNotFound(String),
}
