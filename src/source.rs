//! Single-source fetching: one locator, one read, one JSON parse.
//!
//! Retry and fallback policy live a layer up, in [`crate::resolve`]; this
//! module only classifies how an individual fetch failed.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::VIEWER_USER_AGENT;

/// Which of the two configured sources satisfied a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The live scraper API.
    Primary,
    /// The static snapshot resource.
    Fallback,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// A fully-resolved fetch target for exactly one source.
///
/// Snapshots may be served over HTTP next to the page or read straight from
/// disk, so a locator is either a URL or a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Classification of a failed fetch, reported when both sources fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unreachable,
    NotOk,
    ParseError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => f.write_str("unreachable"),
            Self::NotOk => f.write_str("not-ok"),
            Self::ParseError => f.write_str("parse-error"),
        }
    }
}

/// Why a single-source fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Unreachable(#[source] TransportError),
    #[error("unexpected status {0}")]
    NotOk(reqwest::StatusCode),
    #[error("malformed payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The transport-level cause behind [`FetchError::Unreachable`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Unreachable(_) => FailureKind::Unreachable,
            Self::NotOk(_) => FailureKind::NotOk,
            Self::Parse(_) => FailureKind::ParseError,
        }
    }
}

/// Issues a request against a single locator and parses the JSON body.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(VIEWER_USER_AGENT)
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetch one locator and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Unreachable` when the transport call fails (including a
    /// missing snapshot file), `NotOk` on a non-success HTTP status, and
    /// `Parse` when the body does not decode into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, locator: &Locator) -> Result<T, FetchError> {
        let body = match locator {
            Locator::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| FetchError::Unreachable(e.into()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::NotOk(status));
                }
                response
                    .text()
                    .await
                    .map_err(|e| FetchError::Unreachable(e.into()))?
            }
            Locator::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FetchError::Unreachable(e.into()))?,
        };
        Ok(serde_json::from_str(&body)?)
    }
}
