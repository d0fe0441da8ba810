//! Embedded Snowflake templates rendered with Tera
//!
//! Every template ships inside the binary; a site only provides content,
//! configuration and static assets.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::PostRecord;
use crate::helpers::{format_long_date, format_post_date, html_escape};

/// Client script for reveal-on-scroll and lazy mounting
pub const SITE_SCRIPT: &str = include_str!("snowflake/site.js");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Record bodies are already HTML; text fields are escaped in the
        // templates with `| html_escape`
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("shell.html", include_str!("snowflake/shell.html")),
            ("home.html", include_str!("snowflake/home.html")),
            ("blog.html", include_str!("snowflake/blog.html")),
            ("record.html", include_str!("snowflake/record.html")),
            (
                "partials/site_navi.html",
                include_str!("snowflake/partials/site_navi.html"),
            ),
            (
                "partials/footer.html",
                include_str!("snowflake/partials/footer.html"),
            ),
            (
                "partials/jumbotron.html",
                include_str!("snowflake/partials/jumbotron.html"),
            ),
            (
                "partials/jumbotron_header.html",
                include_str!("snowflake/partials/jumbotron_header.html"),
            ),
            (
                "partials/lazy_list.html",
                include_str!("snowflake/partials/lazy_list.html"),
            ),
            (
                "partials/site_post.html",
                include_str!("snowflake/partials/site_post.html"),
            ),
            (
                "partials/site_page.html",
                include_str!("snowflake/partials/site_page.html"),
            ),
            (
                "partials/post_excerpt.html",
                include_str!("snowflake/partials/post_excerpt.html"),
            ),
        ])?;

        tera.register_filter("html_escape", html_escape_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for element content and attribute values.
/// Unlike the built-in `escape`, slashes are left alone so URLs stay readable.
fn html_escape_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("html_escape", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// A record as seen by the templates; missing values are empty strings
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub path: String,
    pub layout: String,
    /// `YYYY/MM/DD`
    pub date: String,
    /// `YYYY-MM-DD`, for `<time datetime>`
    pub iso_date: String,
    /// `September 1, 2018`, shown as the date tooltip
    pub long_date: String,
    pub categories: Vec<String>,
    pub reading_time: String,
    pub excerpt: String,
    pub summary: String,
    pub html: String,
}

impl From<&PostRecord> for PostView {
    fn from(record: &PostRecord) -> Self {
        let fm = &record.frontmatter;
        Self {
            title: fm.title.clone(),
            path: fm.path.clone(),
            layout: fm.layout.to_string(),
            date: fm.date.as_ref().map(format_post_date).unwrap_or_default(),
            iso_date: fm
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            long_date: fm.date.as_ref().map(format_long_date).unwrap_or_default(),
            categories: fm.categories.iter().cloned().collect(),
            reading_time: record.reading_time.clone().unwrap_or_default(),
            excerpt: record.excerpt.clone().unwrap_or_default(),
            summary: record.summary.clone().unwrap_or_default(),
            html: record.html.clone(),
        }
    }
}
