//! Post cards and the timeline section.

use chrono::Local;
use maud::{html, Markup, Render};

use crate::components::comment::CommentsSection;
use crate::components::media::ImageGallery;
use crate::model::Post;
use crate::timeline::TimelineView;

/// A single post card: date, text, images, counters and comments.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    post: &'a Post,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let date = post
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");

        html! {
            article class="post-card" {
                div class="post-header" {
                    span class="post-date" { (date) }
                }
                div class="post-content" { (post.text) }
                @if !post.images.is_empty() {
                    (ImageGallery::new(&post.images))
                }
                div class="post-footer" {
                    span { "Reposts: " (post.reposts_count) }
                    span { "Comments: " (post.comments_count) }
                    span { "Likes: " (post.attitudes_count) }
                }
                (CommentsSection::new(post.id, post.comments.as_slice()))
            }
        }
    }
}

/// The timeline region: post cards, an empty notice, or the error state.
///
/// "Zero posts" and "failed" are different outcomes and render differently.
#[derive(Debug, Clone)]
pub struct TimelineSection<'a> {
    view: &'a TimelineView,
}

impl<'a> TimelineSection<'a> {
    #[must_use]
    pub const fn new(view: &'a TimelineView) -> Self {
        Self { view }
    }
}

impl Render for TimelineSection<'_> {
    fn render(&self) -> Markup {
        html! {
            div id="timeline" class="timeline" {
                @match self.view {
                    TimelineView::Failed => {
                        div class="loading" {
                            "Error loading posts. Ensure backend is running or posts.json exists."
                        }
                    },
                    TimelineView::Loaded(posts) => {
                        @if posts.is_empty() {
                            div class="loading" { "No posts found. Run the scraper first." }
                        } @else {
                            @for post in posts {
                                (PostCard::new(post))
                            }
                        }
                    },
                }
            }
        }
    }
}
