//! Generator module - writes the static site using the embedded templates

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::components::{
    lazy_units, listing_head, post_head, site_navi, Head, LazyUnit, PostTemplate,
};
use crate::config::SiteMetadata;
use crate::content::PostRecord;
use crate::helpers::{blog_posts, home_posts, output_file, same_route};
use crate::templates::{PostView, TemplateRenderer, SITE_SCRIPT};
use crate::Site;

/// Route of the blog index
pub const BLOG_INDEX_ROUTE: &str = "/blog/";

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub pages: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    metadata: SiteMetadata,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            metadata: site.config.metadata(),
        })
    }

    /// Generate the entire site
    pub fn generate(&self, records: &[PostRecord]) -> Result<GenerateSummary> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let mut summary = GenerateSummary {
            assets: self.copy_static_assets()?,
            ..Default::default()
        };
        self.write_file(&public_dir.join("js").join("site.js"), SITE_SCRIPT)?;

        self.write_page("/", &self.render_home(records)?)?;
        self.write_page(BLOG_INDEX_ROUTE, &self.render_blog_index(records)?)?;
        summary.pages += 2;

        for record in records {
            let html = self.render_record(record)?;
            self.write_page(&record.path, &html)?;
            summary.pages += 1;

            if same_route(&record.path, &self.site.config.not_found_path) {
                self.write_file(&public_dir.join("404.html"), &html)?;
            }
        }

        tracing::info!(
            "Wrote {} pages and {} static files",
            summary.pages,
            summary.assets
        );
        Ok(summary)
    }

    /// Home page: jumbotron plus lazily mounted excerpts
    pub fn render_home(&self, records: &[PostRecord]) -> Result<String> {
        let posts = home_posts(records, &self.site.config);
        let units = self.render_units(posts, "partials/post_excerpt.html", true)?;

        let mut context = self.create_base_context("/", &listing_head(&self.metadata));
        context.insert("units", &units);
        self.renderer.render("home.html", &context)
    }

    /// Blog index: header banner plus lazily mounted posts
    pub fn render_blog_index(&self, records: &[PostRecord]) -> Result<String> {
        let posts = blog_posts(records, &self.site.config);
        let units = self.render_units(posts, "partials/site_post.html", true)?;

        let mut context =
            self.create_base_context(BLOG_INDEX_ROUTE, &listing_head(&self.metadata));
        context.insert("header_title", "Blog");
        context.insert("units", &units);
        self.renderer.render("blog.html", &context)
    }

    /// A single record, as a post or as a page
    pub fn render_record(&self, record: &PostRecord) -> Result<String> {
        let template = PostTemplate::select(record);
        let head = post_head(record, &self.metadata, self.site.config.description_length);

        let mut context = self.create_base_context(&record.path, &head);
        context.insert("post", &PostView::from(record));
        context.insert("is_index", &false);
        let body = self.renderer.render(template.partial(), &context)?;

        context.insert("body", &body);
        self.renderer
            .render("record.html", &context)
            .with_context(|| format!("Failed to render {}", record.source))
    }

    fn render_units(
        &self,
        posts: Vec<&PostRecord>,
        partial: &str,
        is_index: bool,
    ) -> Result<Vec<LazyUnit>> {
        let mut context = Context::new();
        context.insert("site", &self.metadata);
        context.insert("is_index", &is_index);

        lazy_units(posts, &self.site.config.lazy_load, |record| {
            context.insert("post", &PostView::from(record));
            self.renderer.render(partial, &context)
        })
        .collect()
    }

    /// Variables every page template expects
    fn create_base_context(&self, current_path: &str, head: &Head) -> Context {
        let config = &self.site.config;
        let mut context = Context::new();
        context.insert("site", &self.metadata);
        context.insert("head", head);
        context.insert("nav", &site_navi(current_path, &config.nav_links));
        context.insert("current_path", current_path);
        context.insert("stylesheets", &config.stylesheets);
        context.insert("tagline", &config.tagline);
        context.insert("license", &config.license);
        context
    }

    fn write_page(&self, route: &str, html: &str) -> Result<PathBuf> {
        let path = output_file(&self.site.public_dir, route);
        self.write_file(&path, html)?;
        tracing::debug!("Generated: {:?}", path);
        Ok(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
    }

    /// Copy everything under the static directory into the output
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}
