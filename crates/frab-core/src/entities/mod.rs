//! Entity structs for all frabsync domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize` and `Deserialize` for JSON roundtrip (the audit log stores
//! serialized state).

mod event;
mod refresh;
mod room;
mod schedule;
mod speaker;
mod submission;

pub use event::Event;
pub use refresh::RefreshResult;
pub use room::Room;
pub use schedule::{Schedule, TimeSlot};
pub use speaker::{Speaker, truncate_name};
pub use submission::{SubmissionType, Talk, Track};
