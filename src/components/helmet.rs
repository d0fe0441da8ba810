//! Document title and social meta tags

use serde::Serialize;

use crate::config::SiteMetadata;
use crate::content::PostRecord;
use crate::helpers::{absolute_url, meta_description};

/// A `<meta>` element; `attr` is `name` or `property`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub attr: &'static str,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: "name",
            key: key.to_string(),
            content: content.into(),
        }
    }

    fn property(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: "property",
            key: key.to_string(),
            content: content.into(),
        }
    }
}

/// Everything a page contributes to `<head>`
#[derive(Debug, Clone, Serialize)]
pub struct Head {
    pub title: String,
    pub meta: Vec<MetaTag>,
}

impl Head {
    /// Content of the first tag with the given key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.content.as_str())
    }
}

/// Head for the home page and the blog index
pub fn listing_head(site: &SiteMetadata) -> Head {
    Head {
        title: site.title.clone(),
        meta: vec![
            MetaTag::name("twitter:card", "summary"),
            MetaTag::name("twitter:site", format!("@{}", site.twitter)),
            MetaTag::property("og:title", site.title.clone()),
            MetaTag::property("og:type", "website"),
            MetaTag::property("og:description", site.description.clone()),
            MetaTag::property("og:url", site.url.clone()),
            MetaTag::property("og:image", format!("{}/img/profile.jpg", site.url)),
        ],
    }
}

/// Head for a single record
pub fn post_head(record: &PostRecord, site: &SiteMetadata, description_length: usize) -> Head {
    let title = &record.frontmatter.title;
    Head {
        title: format!("{} | {}", title, site.title),
        meta: vec![
            MetaTag::name("twitter:card", "summary"),
            MetaTag::name("twitter:site", format!("@{}", site.twitter)),
            MetaTag::property("og:title", title.clone()),
            MetaTag::property("og:type", "article"),
            MetaTag::property(
                "og:description",
                meta_description(&record.html, description_length),
            ),
            MetaTag::property("og:url", absolute_url(&site.url, &record.frontmatter.path)),
        ],
    }
}
