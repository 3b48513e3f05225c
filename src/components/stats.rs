//! The aggregate counters banner above the timeline.

use maud::{html, Markup, Render};

use crate::timeline::StatsView;

/// Banner showing post and reply totals, or a placeholder when neither
/// source could provide them.
#[derive(Debug, Clone)]
pub struct StatsBanner<'a> {
    view: &'a StatsView,
}

impl<'a> StatsBanner<'a> {
    #[must_use]
    pub const fn new(view: &'a StatsView) -> Self {
        Self { view }
    }

    fn text(&self) -> String {
        match self.view {
            StatsView::Ready(stats) => {
                let mut line = format!(
                    "{} Posts tracked • {} Replies found",
                    stats.posts_count, stats.comments_count
                );
                if let Some(updated) = &stats.last_updated {
                    line.push_str(" • Updated: ");
                    line.push_str(updated);
                }
                line
            }
            StatsView::Unavailable => "Stats unavailable".to_string(),
        }
    }
}

impl Render for StatsBanner<'_> {
    fn render(&self) -> Markup {
        html! {
            div id="stats" class="stats" { (self.text()) }
        }
    }
}
