//! Image display components.

use maud::{html, Markup, Render};

/// Gallery of a post's attached images; each opens full-size in a new tab.
#[derive(Debug, Clone)]
pub struct ImageGallery<'a> {
    images: &'a [String],
}

impl<'a> ImageGallery<'a> {
    #[must_use]
    pub const fn new(images: &'a [String]) -> Self {
        Self { images }
    }
}

impl Render for ImageGallery<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post-images" {
                @for image in self.images {
                    a href=(image) target="_blank" {
                        img src=(image) loading="lazy";
                    }
                }
            }
        }
    }
}
