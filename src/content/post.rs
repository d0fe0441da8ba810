//! Post records

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use crate::helpers::format_post_date;

/// How a record is rendered, from the front-matter `layout` key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    Post,
    Page,
    /// No `layout` key; rendered like a post, never listed
    #[default]
    Unset,
    /// Any other layout name; rendered like a post, never listed
    Other(String),
}

impl Layout {
    /// Parse the front-matter value. Only an explicit `post` is a post.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            None | Some("") => Layout::Unset,
            Some("post") => Layout::Post,
            Some("page") => Layout::Page,
            Some(other) => Layout::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Layout::Post => "post",
            Layout::Page => "page",
            Layout::Unset => "",
            Layout::Other(name) => name,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Interpreted front-matter of a record
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostFrontmatter {
    pub layout: Layout,
    pub title: String,
    pub path: String,
    pub categories: BTreeSet<String>,
    /// `None` when the file has no usable date
    pub date: Option<NaiveDate>,
}

/// A content file after loading, read-only from here on
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostRecord {
    /// Rendered body
    pub html: String,
    /// Route the record is published at
    pub path: String,
    pub frontmatter: PostFrontmatter,
    /// e.g. `"3 min read"`
    pub reading_time: Option<String>,
    /// Plain-text preview
    pub excerpt: Option<String>,
    /// Rendered body up to the `<!-- more -->` marker, when there is one
    pub summary: Option<String>,
    /// Content file relative to the source directory
    pub source: String,
}

impl PostRecord {
    /// Date in the `YYYY/MM/DD` sort format
    pub fn formatted_date(&self) -> Option<String> {
        self.frontmatter.date.as_ref().map(format_post_date)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.frontmatter.categories.contains(category)
    }

    pub fn is_post(&self) -> bool {
        self.frontmatter.layout == Layout::Post
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_name() {
        assert_eq!(Layout::from_name(None), Layout::Unset);
        assert_eq!(Layout::from_name(Some(" ")), Layout::Unset);
        assert_eq!(Layout::from_name(Some("post")), Layout::Post);
        assert_eq!(Layout::from_name(Some("page")), Layout::Page);
        assert_eq!(
            Layout::from_name(Some("gallery")),
            Layout::Other("gallery".to_string())
        );
        assert_eq!(Layout::from_name(Some("gallery")).to_string(), "gallery");
    }

    #[test]
    fn test_formatted_date() {
        let mut record = PostRecord::default();
        assert_eq!(record.formatted_date(), None);
        record.frontmatter.date = NaiveDate::from_ymd_opt(2020, 1, 2);
        assert_eq!(record.formatted_date().as_deref(), Some("2020/01/02"));
    }
}
