//! Choosing how a single record is rendered

use crate::content::{Layout, PostRecord};

/// Rendering mode of a record page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTemplate {
    /// Title, byline, reading time and body
    Post,
    /// Body only
    Page,
}

impl PostTemplate {
    /// `page` layouts get the minimal wrapper, everything else the post one
    pub fn select(record: &PostRecord) -> Self {
        match record.frontmatter.layout {
            Layout::Page => PostTemplate::Page,
            Layout::Post | Layout::Unset | Layout::Other(_) => PostTemplate::Post,
        }
    }

    /// Partial that renders the record body
    pub fn partial(self) -> &'static str {
        match self {
            PostTemplate::Post => "partials/site_post.html",
            PostTemplate::Page => "partials/site_page.html",
        }
    }
}
