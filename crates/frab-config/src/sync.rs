//! Sync pipeline configuration.

use serde::{Deserialize, Serialize};

/// Default per-event sync interval in minutes, used when an event has no
/// interval of its own.
const fn default_interval_minutes() -> i64 {
    5
}

/// Default upstream fetch timeout in seconds.
const fn default_fetch_timeout_secs() -> u64 {
    30
}

/// Default trigger loop tick in seconds.
const fn default_tick_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    "frabsync/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Fallback sync interval for events without a configured one.
    #[serde(default = "default_interval_minutes")]
    pub default_interval_minutes: i64,

    /// Timeout applied to the upstream HTTP fetch.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// How often the daemon checks events for due syncs.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    /// User agent sent on upstream requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_interval_minutes: default_interval_minutes(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            tick_secs: default_tick_secs(),
            user_agent: default_user_agent(),
        }
    }
}
