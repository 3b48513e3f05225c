//! End-to-end pipeline tests: resolution, normalization and rendering.

use std::time::Duration;

use microblog_timeline::config::Config;
use microblog_timeline::model::CommentThread;
use microblog_timeline::render::{HtmlRenderer, Renderer};
use microblog_timeline::resolve::{Endpoints, FallbackResolver};
use microblog_timeline::source::SourceFetcher;
use microblog_timeline::timeline::{load_stats, load_timeline, StatsView, TimelineView};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One post from the live API: images JSON-encoded, no comments field.
const PRIMARY_POSTS: &str = r#"[
    {
        "id": 7,
        "text": "fresh from the api",
        "created_at_ts": 1700000000,
        "images": "[\"x.jpg\"]",
        "reposts_count": 1,
        "comments_count": 2,
        "attitudes_count": 3
    }
]"#;

const PRIMARY_COMMENTS: &str = r#"[
    {"user_name": "ann", "text": "first comment"},
    {"user_name": "bob", "text": "second comment", "reply_text": "cheers"}
]"#;

/// One post from the snapshot: images already an array, comments embedded.
const SNAPSHOT_POSTS: &str = r#"[
    {
        "id": 1,
        "text": "from the snapshot",
        "created_at_ts": 1700000000,
        "images": ["a.jpg", "b.jpg"],
        "reposts_count": 4,
        "comments_count": 2,
        "attitudes_count": 9,
        "comments": [
            {"user_name": "ann", "text": "embedded one"},
            {"user_name": "bob", "text": "embedded two", "reply_text": "hello again"}
        ]
    }
]"#;

fn setup(primary: &MockServer, snapshot_base: &str) -> (FallbackResolver, Endpoints) {
    let config = Config {
        api_base: format!("{}/api", primary.uri()),
        snapshot_base: snapshot_base.to_string(),
        ..Config::for_testing()
    };
    let resolver = FallbackResolver::new(SourceFetcher::new(Duration::from_secs(5)));
    let endpoints = Endpoints::new(&config);
    (resolver, endpoints)
}

fn empty_snapshot_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

async fn mount_json(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_snapshot_posts_skip_comment_fetch() {
    let primary = MockServer::start().await;
    let snapshot = MockServer::start().await;

    mount_json(&primary, "/api/posts", 500, "").await;
    mount_json(&snapshot, "/posts.json", 200, SNAPSHOT_POSTS).await;
    // Embedded comments mean zero comment requests.
    Mock::given(method("GET"))
        .and(path("/api/posts/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(0)
        .mount(&primary)
        .await;

    let (resolver, endpoints) = setup(&primary, &snapshot.uri());
    let timeline = load_timeline(&resolver, &endpoints).await;

    let TimelineView::Loaded(posts) = &timeline else {
        panic!("timeline should load from snapshot");
    };
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    assert_eq!(posts[0].comments.as_slice().len(), 2);

    let page = HtmlRenderer::new().page(&StatsView::Unavailable, &timeline);
    assert!(page.contains("embedded one"));
    assert!(page.contains("embedded two"));
    assert!(page.contains("Blogger Replied:"));
    assert!(page.contains("hello again"));
}

#[tokio::test]
async fn test_embedded_empty_comments_skip_fetch() {
    let primary = MockServer::start().await;
    let snapshot = MockServer::start().await;

    let posts = r#"[{"id": 1, "text": "quiet", "created_at_ts": 1700000000, "images": [], "comments": []}]"#;
    mount_json(&primary, "/api/posts", 503, "").await;
    mount_json(&snapshot, "/posts.json", 200, posts).await;
    Mock::given(method("GET"))
        .and(path("/api/posts/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(0)
        .mount(&primary)
        .await;

    let (resolver, endpoints) = setup(&primary, &snapshot.uri());
    let timeline = load_timeline(&resolver, &endpoints).await;

    let TimelineView::Loaded(posts) = timeline else {
        panic!("timeline should load");
    };
    assert_eq!(posts[0].comments, CommentThread::Loaded(Vec::new()));
}

#[tokio::test]
async fn test_primary_posts_fetch_comments_once() {
    let primary = MockServer::start().await;

    mount_json(&primary, "/api/posts", 200, PRIMARY_POSTS).await;
    Mock::given(method("GET"))
        .and(path("/api/posts/7/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(PRIMARY_COMMENTS, "application/json"),
        )
        .expect(1)
        .mount(&primary)
        .await;

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let timeline = load_timeline(&resolver, &endpoints).await;

    let TimelineView::Loaded(posts) = timeline else {
        panic!("timeline should load from primary");
    };
    assert_eq!(posts.len(), 1);
    // The JSON-encoded images string decodes during normalization.
    assert_eq!(posts[0].images, vec!["x.jpg".to_string()]);

    let comments = posts[0].comments.as_slice();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].user_name, "ann");
    assert_eq!(comments[1].reply.as_deref(), Some("cheers"));
}

#[tokio::test]
async fn test_comment_failure_degrades_to_empty_thread() {
    let primary = MockServer::start().await;

    mount_json(&primary, "/api/posts", 200, PRIMARY_POSTS).await;
    mount_json(&primary, "/api/posts/7/comments", 500, "").await;

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let timeline = load_timeline(&resolver, &endpoints).await;

    let TimelineView::Loaded(posts) = &timeline else {
        panic!("a comment failure must not fail the timeline");
    };
    assert_eq!(posts[0].comments, CommentThread::Loaded(Vec::new()));

    // The page shows the post, not the page-level error state.
    let page = HtmlRenderer::new().page(&StatsView::Unavailable, &timeline);
    assert!(page.contains("fresh from the api"));
    assert!(!page.contains("Error loading posts."));
}

#[tokio::test]
async fn test_stats_display_without_timestamp() {
    let primary = MockServer::start().await;
    mount_json(&primary, "/api/stats", 200, r#"{"posts": 5, "comments": 12}"#).await;

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let stats = load_stats(&resolver, &endpoints).await;

    let rendered = HtmlRenderer::new().stats(&stats);
    assert!(rendered.contains("5 Posts tracked • 12 Replies found"));
    assert!(!rendered.contains("Updated:"));
}

#[tokio::test]
async fn test_stats_display_with_timestamp() {
    let primary = MockServer::start().await;
    mount_json(
        &primary,
        "/api/stats",
        200,
        r#"{"posts": 5, "comments": 12, "last_updated": "2024-01-15 12:00"}"#,
    )
    .await;

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let stats = load_stats(&resolver, &endpoints).await;

    let rendered = HtmlRenderer::new().stats(&stats);
    assert!(rendered.contains("5 Posts tracked • 12 Replies found • Updated: 2024-01-15 12:00"));
}

#[tokio::test]
async fn test_stats_total_failure_renders_placeholder() {
    let primary = MockServer::start().await;
    mount_json(&primary, "/api/stats", 500, "").await;

    // Empty snapshot directory: the fallback file is missing too.
    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let stats = load_stats(&resolver, &endpoints).await;

    assert_eq!(stats, StatsView::Unavailable);
    assert!(HtmlRenderer::new().stats(&stats).contains("Stats unavailable"));
}

#[tokio::test]
async fn test_zero_posts_is_not_the_error_state() {
    let primary = MockServer::start().await;
    mount_json(&primary, "/api/posts", 200, "[]").await;

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let timeline = load_timeline(&resolver, &endpoints).await;

    assert_eq!(timeline, TimelineView::Loaded(Vec::new()));
    let rendered = HtmlRenderer::new().timeline(&timeline);
    assert!(rendered.contains("No posts found. Run the scraper first."));
    assert!(!rendered.contains("Error loading posts."));
}

#[tokio::test]
async fn test_total_post_failure_is_the_error_state() {
    let primary = MockServer::start().await;
    mount_json(&primary, "/api/posts", 500, "").await;

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let timeline = load_timeline(&resolver, &endpoints).await;

    assert_eq!(timeline, TimelineView::Failed);
    let rendered = HtmlRenderer::new().timeline(&timeline);
    assert!(rendered.contains("Error loading posts. Ensure backend is running or posts.json exists."));
    assert!(!rendered.contains("No posts found."));
}

#[tokio::test]
async fn test_post_order_survives_comment_completion_order() {
    let primary = MockServer::start().await;

    let posts = r#"[
        {"id": 1, "text": "one", "created_at_ts": 1700000000, "images": []},
        {"id": 2, "text": "two", "created_at_ts": 1700000100, "images": []},
        {"id": 3, "text": "three", "created_at_ts": 1700000200, "images": []}
    ]"#;
    mount_json(&primary, "/api/posts", 200, posts).await;

    // The first post's comments arrive last; order must still follow the list.
    Mock::given(method("GET"))
        .and(path("/api/posts/1/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"[{"user_name": "slow", "text": "late"}]"#, "application/json")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&primary)
        .await;
    for (id, delay) in [(2u32, 150u64), (3, 0)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/posts/{id}/comments")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("[]", "application/json")
                    .set_delay(Duration::from_millis(delay)),
            )
            .mount(&primary)
            .await;
    }

    let dir = empty_snapshot_dir();
    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let timeline = load_timeline(&resolver, &endpoints).await;

    let TimelineView::Loaded(posts) = timeline else {
        panic!("timeline should load");
    };
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(posts[0].comments.as_slice().len(), 1);
}

#[tokio::test]
async fn test_snapshot_directory_serves_posts() {
    let primary = MockServer::start().await;
    mount_json(&primary, "/api/posts", 500, "").await;

    let dir = empty_snapshot_dir();
    std::fs::write(dir.path().join("posts.json"), SNAPSHOT_POSTS)
        .expect("Failed to write snapshot");

    let (resolver, endpoints) = setup(&primary, dir.path().to_str().unwrap());
    let timeline = load_timeline(&resolver, &endpoints).await;

    let TimelineView::Loaded(posts) = timeline else {
        panic!("timeline should load from the snapshot directory");
    };
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text, "from the snapshot");
}
