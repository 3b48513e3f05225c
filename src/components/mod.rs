//! Maud HTML template components for the timeline page.
//!
//! Components are organized into submodules by page region:
//!
//! - `layout`: the HTML skeleton around the two content regions
//! - `stats`: the aggregate counters banner
//! - `post`: post cards and the timeline section
//! - `comment`: comment blocks and per-post comment sections
//! - `media`: the image gallery attached to a post

pub mod comment;
pub mod layout;
pub mod media;
pub mod post;
pub mod stats;

pub use comment::{CommentBlock, CommentsSection};
pub use layout::PageLayout;
pub use media::ImageGallery;
pub use post::{PostCard, TimelineSection};
pub use stats::StatsBanner;
