use serde::{Deserialize, Serialize};

/// A room within an event, identified by (event, name).
///
/// Created on first sighting of an unknown name; never deleted or renamed
/// by the sync pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub event_id: String,
    pub name: String,
}
