//! Blocking HTTP fetch layer shared by the resolver, crawler, and
//! decklist parser.
//!
//! One lazily-built client with a configurable timeout; every fetch in the
//! pipeline is a plain blocking GET, issued strictly in sequence.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{DeckcoreError, Result};

/// Thin wrapper around a blocking [`reqwest::blocking::Client`].
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// GET a URL and return the response body as text.
    ///
    /// Any transport failure or non-success status is an error.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        Ok(resp.text()?)
    }

    /// GET a URL and return only the status code.
    ///
    /// Used by the resolver, which branches on 200 vs 404 vs anything else.
    pub fn get_status(&self, url: &str) -> Result<u16> {
        let resp = self.client.get(url).send()?;
        Ok(resp.status().as_u16())
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}

/// Build a [`DeckcoreError::Status`] for an unexpected status code.
pub(crate) fn status_error(url: &str, status: u16) -> DeckcoreError {
    DeckcoreError::Status {
        url: url.to_string(),
        status,
    }
}
