//! Page layout around the stats and timeline regions.

use maud::{html, Markup, DOCTYPE};

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::PageLayout;
///
/// let content = html! { h1 { "Hello" } };
/// let page = PageLayout::new("Timeline").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct PageLayout<'a> {
    title: &'a str,
}

impl<'a> PageLayout<'a> {
    /// Create a new page layout with the given page title.
    #[must_use]
    pub const fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render the complete HTML page with the given content.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) }
                    link rel="stylesheet" href="style.css";
                }
                body {
                    main class="container" {
                        (content)
                    }
                }
            }
        }
    }
}
