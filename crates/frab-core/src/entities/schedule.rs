use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A schedule version for an event.
///
/// The single row with `version = NULL` is the working schedule — the
/// mutable editing surface every sync run upserts slots into. Rows with a
/// version are frozen releases: immutable snapshots tagged with the
/// upstream-provided version string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    pub id: String,
    pub event_id: String,
    pub version: Option<String>,
    pub frozen_at: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Whether this is a frozen (released) version.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.version.is_some()
    }
}

/// A talk's placement within one schedule. One slot per (talk, schedule);
/// upserted on every run, never deleted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    pub talk_id: String,
    pub schedule_id: String,
    pub room_id: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_visible: bool,
}
