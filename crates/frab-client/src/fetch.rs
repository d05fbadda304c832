//! Upstream document fetcher.
//!
//! A single GET with no auth and no retries — retry policy belongs to the
//! task runner. The fetch completes (or fails) strictly before any storage
//! transaction opens, so a slow upstream never holds a transaction.

use std::time::Duration;

use crate::error::FetchError;

/// HTTP client for retrieving upstream schedule documents.
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Create a client with the given user agent and request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
        }
    }

    /// Fetch the document at `url`, returning the complete raw body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] on any non-200 response, or
    /// [`FetchError::Http`] on transport failure.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "fetching upstream schedule");
        let resp = self.http.get(url).send().await?;
        let status = resp.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
