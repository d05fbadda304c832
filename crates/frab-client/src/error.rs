//! Upstream client error types.

use thiserror::Error;

/// Errors fetching the upstream schedule document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-200 status. Anything but 200 aborts the
    /// run — partial or error bodies are never parsed.
    #[error("could not retrieve schedule, received {status} response from {url}")]
    Status {
        /// HTTP status code returned by upstream.
        status: u16,
        /// The URL that was fetched.
        url: String,
    },
}

/// Errors parsing a frab schedule document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root `<version>` element is absent or empty.
    #[error("document has no <version> element")]
    MissingVersion,

    /// A `<room>` element has no name attribute.
    #[error("room element has no name attribute")]
    MissingRoomName,

    /// An `<event>` element lacks a required attribute.
    #[error("event element has no '{attribute}' attribute")]
    MissingAttribute { attribute: &'static str },

    /// A required per-talk element is absent.
    #[error("event {id}: missing required element <{element}>")]
    MissingElement { id: String, element: &'static str },

    /// A per-talk field is present but unparsable.
    #[error("event {id}: invalid {field} '{value}': {reason}")]
    InvalidField {
        id: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The document is not valid UTF-8.
    #[error("document is not valid UTF-8")]
    Encoding,
}
