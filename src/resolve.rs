//! Primary-then-fallback resolution of one logical resource.
//!
//! The chain is fixed: try the live API, and on any failure try the static
//! snapshot. There is no racing and no retrying. A result is attributed to
//! exactly one source; data from the two is never mixed within a resource.

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::constants::{POSTS_SNAPSHOT, STATS_SNAPSHOT};
use crate::source::{FailureKind, FetchError, Locator, Source, SourceFetcher};

/// What is being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stats,
    PostList,
    CommentList { post_id: i64 },
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stats => f.write_str("stats"),
            Self::PostList => f.write_str("posts"),
            Self::CommentList { post_id } => write!(f, "comments/{post_id}"),
        }
    }
}

/// A resource plus the locators able to satisfy it.
///
/// Comment lists define no fallback location: the snapshot only carries
/// comments inline on its post records.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    pub kind: ResourceKind,
    pub primary: Locator,
    pub fallback: Option<Locator>,
}

/// A parsed payload together with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub payload: T,
    pub source: Source,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("both sources failed (primary: {primary}, fallback: {fallback})")]
    BothSourcesFailed {
        primary: FetchError,
        fallback: FetchError,
    },
    #[error("primary source failed and no fallback is defined: {0}")]
    PrimaryOnly(#[source] FetchError),
}

impl ResolveError {
    /// Failure kinds of the underlying fetches, primary first.
    #[must_use]
    pub fn kinds(&self) -> (FailureKind, Option<FailureKind>) {
        match self {
            Self::BothSourcesFailed { primary, fallback } => {
                (primary.kind(), Some(fallback.kind()))
            }
            Self::PrimaryOnly(primary) => (primary.kind(), None),
        }
    }
}

/// Builds [`ResourceRequest`]s from the configured source locations.
#[derive(Debug, Clone)]
pub struct Endpoints {
    api_base: String,
    snapshot: SnapshotBase,
}

#[derive(Debug, Clone)]
enum SnapshotBase {
    Url(String),
    Dir(PathBuf),
}

impl Endpoints {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let api_base = config.api_base.trim_end_matches('/').to_string();
        let base = &config.snapshot_base;
        let snapshot = if base.starts_with("http://") || base.starts_with("https://") {
            SnapshotBase::Url(base.trim_end_matches('/').to_string())
        } else {
            SnapshotBase::Dir(PathBuf::from(base))
        };
        Self { api_base, snapshot }
    }

    fn snapshot_locator(&self, file: &str) -> Locator {
        match &self.snapshot {
            SnapshotBase::Url(base) => Locator::Url(format!("{base}/{file}")),
            SnapshotBase::Dir(dir) => Locator::File(dir.join(file)),
        }
    }

    #[must_use]
    pub fn stats(&self) -> ResourceRequest {
        ResourceRequest {
            kind: ResourceKind::Stats,
            primary: Locator::Url(format!("{}/stats", self.api_base)),
            fallback: Some(self.snapshot_locator(STATS_SNAPSHOT)),
        }
    }

    #[must_use]
    pub fn posts(&self) -> ResourceRequest {
        ResourceRequest {
            kind: ResourceKind::PostList,
            primary: Locator::Url(format!("{}/posts", self.api_base)),
            fallback: Some(self.snapshot_locator(POSTS_SNAPSHOT)),
        }
    }

    /// Per-post comments exist only on the live API.
    #[must_use]
    pub fn comments(&self, post_id: i64) -> ResourceRequest {
        ResourceRequest {
            kind: ResourceKind::CommentList { post_id },
            primary: Locator::Url(format!("{}/posts/{post_id}/comments", self.api_base)),
            fallback: None,
        }
    }
}

/// Resolves a resource by trying the primary source, then the fallback.
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    fetcher: SourceFetcher,
}

impl FallbackResolver {
    #[must_use]
    pub fn new(fetcher: SourceFetcher) -> Self {
        Self { fetcher }
    }

    /// Run the two-step chain for one request.
    ///
    /// # Errors
    ///
    /// Returns `BothSourcesFailed` carrying both underlying failures when the
    /// fallback also fails, or `PrimaryOnly` when the request defines no
    /// fallback. Empty data is never synthesized on failure.
    pub async fn resolve<T: DeserializeOwned>(
        &self,
        request: &ResourceRequest,
    ) -> Result<Resolved<T>, ResolveError> {
        let primary_err = match self.fetcher.fetch(&request.primary).await {
            Ok(payload) => {
                return Ok(Resolved {
                    payload,
                    source: Source::Primary,
                })
            }
            Err(e) => e,
        };

        let Some(fallback) = &request.fallback else {
            return Err(ResolveError::PrimaryOnly(primary_err));
        };

        warn!(
            resource = %request.kind,
            source = %Source::Primary,
            kind = %primary_err.kind(),
            error = %primary_err,
            "Source failed, trying fallback"
        );

        match self.fetcher.fetch(fallback).await {
            Ok(payload) => Ok(Resolved {
                payload,
                source: Source::Fallback,
            }),
            Err(fallback_err) => Err(ResolveError::BothSourcesFailed {
                primary: primary_err,
                fallback: fallback_err,
            }),
        }
    }
}
