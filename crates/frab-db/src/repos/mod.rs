//! Repository functions over the frabsync schema.
//!
//! Every function takes a `&libsql::Connection` as its first argument.
//! `libsql::Transaction` derefs to `Connection`, so callers choose whether
//! a call runs standalone or inside a unit of work.

pub mod events;
pub mod refresh_results;
pub mod rooms;
pub mod schedules;
pub mod slots;
pub mod speakers;
pub mod submission_types;
pub mod talks;
pub mod tracks;
