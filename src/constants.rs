//! Shared constants used across the application.

/// User agent string sent with every live-API and snapshot request.
pub const VIEWER_USER_AGENT: &str = "microblog-timeline/0.1";

/// File name of the stats snapshot inside the snapshot location.
pub const STATS_SNAPSHOT: &str = "stats.json";

/// File name of the post-list snapshot inside the snapshot location.
pub const POSTS_SNAPSHOT: &str = "posts.json";
