//! Comment blocks and the per-post comments section.

use maud::{html, Markup, Render};

use crate::model::Comment;

/// A single comment, with the blogger's reply box when one exists.
#[derive(Debug, Clone)]
pub struct CommentBlock<'a> {
    comment: &'a Comment,
}

impl<'a> CommentBlock<'a> {
    #[must_use]
    pub const fn new(comment: &'a Comment) -> Self {
        Self { comment }
    }
}

impl Render for CommentBlock<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="comment" {
                div class="comment-user" { "@" (self.comment.user_name) }
                div class="comment-text" { (self.comment.text) }
                @if let Some(reply) = &self.comment.reply {
                    div class="reply-box" {
                        div class="reply-label" { "Blogger Replied:" }
                        div class="reply-text" { (reply) }
                    }
                }
            }
        }
    }
}

/// The comments region of a post card; empty threads render an empty region.
#[derive(Debug, Clone)]
pub struct CommentsSection<'a> {
    post_id: i64,
    comments: &'a [Comment],
}

impl<'a> CommentsSection<'a> {
    #[must_use]
    pub const fn new(post_id: i64, comments: &'a [Comment]) -> Self {
        Self { post_id, comments }
    }
}

impl Render for CommentsSection<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="comments-section" id=(format!("comments-{}", self.post_id)) {
                @for comment in self.comments {
                    (CommentBlock::new(comment))
                }
            }
        }
    }
}
