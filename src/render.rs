//! Presentation boundary.
//!
//! A renderer consumes immutable, fully-normalized outcome values and never
//! reaches back into the fetch layer; the two regions it receives are
//! disjoint, so either can be rendered without the other.

use maud::{html, Render as _};

use crate::components::{PageLayout, StatsBanner, TimelineSection};
use crate::timeline::{StatsView, TimelineView};

/// Output side of the system.
pub trait Renderer {
    /// Render the aggregate-counters region.
    fn stats(&self, stats: &StatsView) -> String;

    /// Render the timeline region.
    fn timeline(&self, timeline: &TimelineView) -> String;

    /// Render the complete page from both regions.
    fn page(&self, stats: &StatsView, timeline: &TimelineView) -> String;
}

/// Renders the single-page timeline markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn stats(&self, stats: &StatsView) -> String {
        StatsBanner::new(stats).render().into_string()
    }

    fn timeline(&self, timeline: &TimelineView) -> String {
        TimelineSection::new(timeline).render().into_string()
    }

    fn page(&self, stats: &StatsView, timeline: &TimelineView) -> String {
        let content = html! {
            (StatsBanner::new(stats))
            (TimelineSection::new(timeline))
        };
        PageLayout::new("Timeline").render(content).into_string()
    }
}
