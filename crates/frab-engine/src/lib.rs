//! # frab-engine
//!
//! The schedule reconciliation pipeline: change detection, entity
//! resolution, talk merge, conditional release, and the periodic trigger.
//!
//! The entry points are [`refresh_by_slug`] / [`refresh_event`] for one
//! run and [`trigger::run`] for the daemon loop. Everything a run writes
//! after parsing happens inside one transaction; a failed run leaves
//! storage exactly as it found it.

pub mod detector;
pub mod error;
pub mod merger;
pub mod refresh;
pub mod releaser;
pub mod resolver;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::SyncError;
pub use refresh::{RefreshOutcome, refresh_by_slug, refresh_event, sync_event};
pub use resolver::CodeResolution;
