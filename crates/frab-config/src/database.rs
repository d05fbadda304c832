//! Database configuration.

use serde::{Deserialize, Serialize};

/// Default database file path, relative to the working directory.
fn default_path() -> String {
    "frabsync.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_local_file() {
        assert_eq!(DatabaseConfig::default().path, "frabsync.db");
    }
}
