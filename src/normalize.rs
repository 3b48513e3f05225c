//! Parse-boundary record types and their conversion to canonical entities.
//!
//! Two payload shapes reach this module. The live API serves posts whose
//! `images` field is a JSON-encoded string and omits `comments` (they are a
//! separate resource), while snapshot files carry `images` as a real array
//! and embed `comments` inline. Both collapse to the same canonical form
//! here, and the shape ambiguity never escapes this module.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::model::{Comment, CommentThread, Post, Stats};

/// Post record as served by either source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: i64,
    pub text: String,
    pub created_at_ts: i64,
    #[serde(default)]
    pub images: RawImages,
    #[serde(default)]
    pub reposts_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub attitudes_count: i64,
    /// Present (possibly empty) when the source bundles comments inline;
    /// absent when they must be fetched separately.
    #[serde(default)]
    pub comments: Option<Vec<RawComment>>,
}

/// `images` as it appears on the wire: already an array, or a JSON-encoded
/// string left over from the scraper's storage layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawImages {
    List(Vec<String>),
    Encoded(String),
}

impl Default for RawImages {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// Comment record as served by either source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    pub user_name: String,
    pub text: String,
    #[serde(default)]
    pub reply_text: Option<String>,
}

/// Aggregate counters as served by either source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStats {
    pub posts: u64,
    pub comments: u64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Convert a raw post from either source into its canonical form.
#[must_use]
pub fn normalize_post(raw: RawPost) -> Post {
    let images = decode_images(raw.images, raw.id);
    let comments = match raw.comments {
        Some(comments) => {
            CommentThread::Loaded(comments.into_iter().map(normalize_comment).collect())
        }
        None => CommentThread::NotLoaded,
    };
    Post {
        id: raw.id,
        text: raw.text,
        created_at: instant_from_epoch(raw.created_at_ts, raw.id),
        reposts_count: raw.reposts_count,
        comments_count: raw.comments_count,
        attitudes_count: raw.attitudes_count,
        images,
        comments,
    }
}

/// An absent or empty `reply_text` means the blogger never replied.
#[must_use]
pub fn normalize_comment(raw: RawComment) -> Comment {
    Comment {
        user_name: raw.user_name,
        text: raw.text,
        reply: raw.reply_text.filter(|reply| !reply.is_empty()),
    }
}

#[must_use]
pub fn normalize_stats(raw: RawStats) -> Stats {
    Stats {
        posts_count: raw.posts,
        comments_count: raw.comments,
        last_updated: raw.last_updated,
    }
}

/// Malformed image data degrades to an empty list, never an error.
fn decode_images(images: RawImages, post_id: i64) -> Vec<String> {
    match images {
        RawImages::List(urls) => urls,
        RawImages::Encoded(encoded) => match serde_json::from_str(&encoded) {
            Ok(urls) => urls,
            Err(error) => {
                warn!(post_id, %error, "Discarding undecodable images field");
                Vec::new()
            }
        },
    }
}

fn instant_from_epoch(seconds: i64, post_id: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap_or_else(|| {
        warn!(post_id, seconds, "Post timestamp out of range, clamping to epoch start");
        DateTime::UNIX_EPOCH
    })
}
