use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A managed conference event. One row per schedule pulled from upstream.
///
/// Holds the upstream URL, the sync interval, and the last-sync timestamp
/// the periodic trigger checks. `date_from`/`date_to` are recomputed from
/// released slots whenever a new schedule version is frozen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub upstream_url: Option<String>,
    pub sync_interval_minutes: Option<i64>,
    pub last_sync: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Effective sync interval in minutes. Defaults to 5 when unset.
    #[must_use]
    pub fn interval_minutes(&self) -> i64 {
        match self.sync_interval_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => 5,
        }
    }
}
