use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only audit record, one per refresh attempt that got past the
/// change detector. Never updated or deleted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResult {
    pub id: String,
    pub event_id: String,
    /// The schedule version released by this refresh, if any.
    pub schedule_id: Option<String>,
    /// Raw upstream document content.
    pub content: String,
    /// Hex-encoded SHA-256 of the raw content bytes.
    pub checksum: String,
    /// JSON-serialized change map keyed by talk code.
    pub changes: String,
    pub timestamp: DateTime<Utc>,
}
