//! The two top-level pipelines: aggregate stats and the post timeline.
//!
//! Each pipeline resolves its resource, normalizes it and produces an
//! outcome value for the renderer. Failures degrade per resource; neither
//! pipeline can abort the other.

use futures_util::future::join_all;
use tracing::{error, info, warn};

use crate::model::{CommentThread, Post, Stats};
use crate::normalize::{
    normalize_comment, normalize_post, normalize_stats, RawComment, RawPost, RawStats,
};
use crate::resolve::{Endpoints, FallbackResolver, Resolved};

/// Outcome of the stats pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsView {
    Ready(Stats),
    /// Both sources failed; the renderer shows a placeholder instead.
    Unavailable,
}

/// Outcome of the posts pipeline.
///
/// An empty `Loaded` is a successful resolution with zero posts and renders
/// differently from `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineView {
    Loaded(Vec<Post>),
    Failed,
}

/// Resolve aggregate stats, degrading to a placeholder on total failure.
pub async fn load_stats(resolver: &FallbackResolver, endpoints: &Endpoints) -> StatsView {
    match resolver.resolve::<RawStats>(&endpoints.stats()).await {
        Ok(Resolved { payload, source }) => {
            info!(%source, "Stats resolved");
            StatsView::Ready(normalize_stats(payload))
        }
        Err(error) => {
            error!(%error, "Failed to fetch stats from either source");
            StatsView::Unavailable
        }
    }
}

/// Resolve the post list and, where needed, each post's comments.
///
/// Posts keep the order the source returned them in, regardless of how the
/// per-post comment fetches complete.
pub async fn load_timeline(resolver: &FallbackResolver, endpoints: &Endpoints) -> TimelineView {
    let Resolved {
        payload: raw_posts,
        source,
    } = match resolver.resolve::<Vec<RawPost>>(&endpoints.posts()).await {
        Ok(resolved) => resolved,
        Err(error) => {
            error!(%error, "Failed to fetch posts from either source");
            return TimelineView::Failed;
        }
    };

    info!(%source, posts = raw_posts.len(), "Post list resolved");

    let posts = join_all(
        raw_posts
            .into_iter()
            .map(normalize_post)
            .map(|post| attach_comments(resolver, endpoints, post)),
    )
    .await;

    TimelineView::Loaded(posts)
}

/// Fetch comments for a post whose source did not embed them.
///
/// A snapshot post arrives with its thread inline and is returned untouched,
/// with no network call. A failed comment fetch degrades this one post to an
/// empty thread; siblings and the page are unaffected.
async fn attach_comments(
    resolver: &FallbackResolver,
    endpoints: &Endpoints,
    mut post: Post,
) -> Post {
    if post.comments.is_loaded() {
        return post;
    }

    post.comments = match resolver
        .resolve::<Vec<RawComment>>(&endpoints.comments(post.id))
        .await
    {
        Ok(resolved) => {
            CommentThread::Loaded(resolved.payload.into_iter().map(normalize_comment).collect())
        }
        Err(error) => {
            warn!(post_id = post.id, %error, "Could not fetch comments, rendering none");
            CommentThread::Loaded(Vec::new())
        }
    };

    post
}
