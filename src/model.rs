//! Canonical timeline entities produced by normalization.
//!
//! Raw source records are transient; these values are immutable for the
//! lifetime of a render pass.

use chrono::{DateTime, Utc};

/// A single timeline post with fully-normalized fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub reposts_count: i64,
    pub comments_count: i64,
    pub attitudes_count: i64,
    /// Image URLs; always a concrete list, never an encoded string.
    pub images: Vec<String>,
    pub comments: CommentThread,
}

/// Comments attached to a post: resolved in full, or not fetched yet.
///
/// There is no partially-resolved state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentThread {
    Loaded(Vec<Comment>),
    NotLoaded,
}

impl CommentThread {
    /// Comments to display; an unresolved thread shows none.
    #[must_use]
    pub fn as_slice(&self) -> &[Comment] {
        match self {
            Self::Loaded(comments) => comments,
            Self::NotLoaded => &[],
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// A single reader comment, with the blogger's reply when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub user_name: String,
    pub text: String,
    pub reply: Option<String>,
}

/// Aggregate counters shown above the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub posts_count: u64,
    pub comments_count: u64,
    /// Display string; shown verbatim when present.
    pub last_updated: Option<String>,
}
