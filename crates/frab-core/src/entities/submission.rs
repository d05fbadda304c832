use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submission type, identified by (event, name, default duration).
///
/// A new type is minted whenever no existing type matches both name and
/// duration; durations are never merged into existing types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionType {
    pub id: String,
    pub event_id: String,
    pub name: String,
    /// Default duration in whole minutes.
    pub default_duration: i64,
}

/// A track within an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub event_id: String,
    pub name: String,
}

/// A talk (submission), the central mutable entity of the pipeline.
///
/// Identity within an event is the `code`, resolved from the upstream id
/// or truncated guid. Once assigned, a code is never reassigned; only
/// field values and slot placement change across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Talk {
    pub id: String,
    pub event_id: String,
    pub code: String,
    pub submission_type_id: String,
    pub track_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub content_locale: String,
    pub do_not_record: bool,
    pub created_at: DateTime<Utc>,
}
