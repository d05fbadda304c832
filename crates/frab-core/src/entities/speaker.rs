use serde::{Deserialize, Serialize};

/// Maximum stored length of a speaker display name. Lookups and inserts
/// both truncate to this length, so a name only ever matches one row.
pub const MAX_SPEAKER_NAME: usize = 60;

/// A speaker, identified by display name truncated to [`MAX_SPEAKER_NAME`].
///
/// Created with a synthesized placeholder contact address when no matching
/// speaker exists; attached to the event via a profile row on first creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Truncate a display name to the stored maximum, on a char boundary.
#[must_use]
pub fn truncate_name(name: &str) -> &str {
    match name.char_indices().nth(MAX_SPEAKER_NAME) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}
