//! Upstream access for frabsync: HTTP fetch and frab XML parsing.
//!
//! This crate is storage-free. It turns a URL into raw bytes
//! ([`UpstreamClient`]) and raw bytes into a typed schedule tree
//! ([`parse_bytes`]); everything stateful lives in `frab-engine`.

pub mod error;
pub mod fetch;
pub mod parser;

pub use error::{FetchError, ParseError};
pub use fetch::UpstreamClient;
pub use parser::{parse_bytes, parse_str, ParsedDay, ParsedRoom, ParsedSchedule, ParsedTalk};
