//! Content loader - turns the source directory into post records

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{FrontMatter, Layout, MarkdownRenderer, PostFrontmatter, PostRecord};
use crate::error::ContentError;
use crate::helpers::{excerpt_text, normalize_route, parse_date, reading_time, route_from_source};
use crate::Site;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    exclude: Vec<glob::Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Result<Self> {
        let exclude = site
            .config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern {:?}", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            site,
            renderer: MarkdownRenderer::new(&site.config.highlight),
            exclude,
        })
    }

    /// Load every markdown file under the source directory.
    ///
    /// Files that cannot be read or parsed are skipped with a warning. Date
    /// problems under `strict_dates` and route collisions abort the load.
    pub fn load_records(&self) -> Result<Vec<PostRecord>> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", source_dir);
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir).unwrap_or(path);
            if self.exclude.iter().any(|p| p.matches_path(relative)) {
                tracing::debug!("Excluded: {:?}", relative);
                continue;
            }

            match self.load_record(path) {
                Ok(record) => records.push(record),
                Err(e @ (ContentError::MissingDate(_) | ContentError::InvalidDate { .. })) => {
                    return Err(e.into());
                }
                Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
            }
        }

        check_unique_routes(&records)?;
        Ok(records)
    }

    /// Load a single record from a file
    pub fn load_record(&self, path: &Path) -> Result<PostRecord, ContentError> {
        let config = &self.site.config;
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|message| {
            ContentError::FrontMatter {
                path: path.to_path_buf(),
                message,
            }
        })?;

        let relative = path.strip_prefix(&self.site.source_dir).unwrap_or(path);
        let layout = Layout::from_name(fm.layout.as_deref());
        let date = self.resolve_date(path, fm.date.as_deref(), &layout)?;

        let render = |markdown: &str| {
            self.renderer
                .render(markdown)
                .map_err(|e| ContentError::Render {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
        };

        let (summary_md, full_md) = MarkdownRenderer::split_more(body);
        let html = render(&full_md)?;
        let summary = summary_md.map(render).transpose()?;

        let excerpt = match &summary {
            Some(summary_html) => excerpt_text(summary_html, usize::MAX),
            None => excerpt_text(&html, config.excerpt_length),
        };

        let route = fm
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(normalize_route)
            .unwrap_or_else(|| route_from_source(relative));

        let title = fm.title.unwrap_or_else(|| title_from_source(relative));

        let categories: BTreeSet<String> = fm
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        Ok(PostRecord {
            reading_time: Some(reading_time(&html, config.words_per_minute)),
            excerpt: (!excerpt.is_empty()).then_some(excerpt),
            summary,
            html,
            path: route.clone(),
            frontmatter: PostFrontmatter {
                layout,
                title,
                path: route,
                categories,
                date,
            },
            source: relative.to_string_lossy().into_owned(),
        })
    }

    /// Posts must carry a date under `strict_dates`; otherwise a missing or
    /// unreadable date is reported and the record sorts as oldest.
    fn resolve_date(
        &self,
        path: &Path,
        raw: Option<&str>,
        layout: &Layout,
    ) -> Result<Option<chrono::NaiveDate>, ContentError> {
        let strict = self.site.config.strict_dates && *layout == Layout::Post;

        match raw {
            Some(value) => match parse_date(value) {
                Some(date) => Ok(Some(date)),
                None if strict => Err(ContentError::InvalidDate {
                    path: path.to_path_buf(),
                    value: value.to_string(),
                }),
                None => {
                    tracing::warn!("Unrecognized date {:?} in {:?}, listing it last", value, path);
                    Ok(None)
                }
            },
            None if strict => Err(ContentError::MissingDate(path.to_path_buf())),
            None if *layout == Layout::Post => {
                tracing::warn!("No date in {:?}, listing it last", path);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// Two records may not publish to the same route
fn check_unique_routes(records: &[PostRecord]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for record in records {
        if let Some(first) = seen.insert(&record.path, &record.source) {
            return Err(ContentError::DuplicatePath {
                route: record.path.clone(),
                first: first.to_string(),
                second: record.source.clone(),
            });
        }
    }
    Ok(())
}

/// `_drafts`, `.git` and friends
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('_') || s.starts_with('.'))
        .unwrap_or(false)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// `release-notes/index.md` -> `release-notes`
fn title_from_source(relative: &Path) -> String {
    let stem = relative.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled");
    if stem == "index" {
        if let Some(parent) = relative.parent().and_then(|p| p.file_name()).and_then(|s| s.to_str()) {
            return parent.to_string();
        }
    }
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HighlightConfig, SiteConfig};
    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)], config: SiteConfig) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join("content").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let config = SiteConfig {
            highlight: HighlightConfig {
                enable: false,
                ..Default::default()
            },
            ..config
        };
        let site = Site::with_config(dir.path(), config);
        (dir, site)
    }

    #[test]
    fn test_load_post_record() {
        let (_dir, site) = site_with(
            &[(
                "hello/index.md",
                "---\nlayout: post\ntitle: Hello\npath: /blog/hello/\ndate: 2018-09-01\ncategories: [news]\n---\nFirst words.\n\n<!-- more -->\n\nLater words.\n",
            )],
            SiteConfig::default(),
        );
        let loader = ContentLoader::new(&site).unwrap();
        let records = loader.load_records().unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.path, "/blog/hello/");
        assert_eq!(record.frontmatter.title, "Hello");
        assert_eq!(record.formatted_date().as_deref(), Some("2018/09/01"));
        assert!(record.has_category("news"));
        assert_eq!(record.excerpt.as_deref(), Some("First words."));
        assert!(record.summary.as_deref().unwrap().contains("First words."));
        assert!(!record.summary.as_deref().unwrap().contains("Later words."));
        assert!(record.html.contains("Later words."));
        assert_eq!(record.reading_time.as_deref(), Some("1 min read"));
        assert_eq!(record.source, Path::new("hello").join("index.md").to_string_lossy());
    }

    #[test]
    fn test_defaults_from_source_path() {
        let (_dir, site) = site_with(&[("notes/index.md", "Just text.")], SiteConfig::default());
        let records = ContentLoader::new(&site).unwrap().load_records().unwrap();
        assert_eq!(records[0].path, "/notes/");
        assert_eq!(records[0].frontmatter.title, "notes");
        assert_eq!(records[0].frontmatter.layout, Layout::Unset);
        assert!(!records[0].is_post());
        assert_eq!(records[0].frontmatter.date, None);
        assert!(records[0].frontmatter.categories.is_empty());
    }

    #[test]
    fn test_hidden_and_excluded_files_are_skipped() {
        let config = SiteConfig {
            exclude: vec!["wip/*".to_string()],
            ..Default::default()
        };
        let (_dir, site) = site_with(
            &[
                ("_drafts/a.md", "draft"),
                (".cache/b.md", "cache"),
                ("wip/c.md", "wip"),
                ("real.md", "real"),
                ("image.png", "binary"),
            ],
            config,
        );
        let records = ContentLoader::new(&site).unwrap().load_records().unwrap();
        let sources: Vec<_> = records.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["real.md"]);
    }

    #[test]
    fn test_malformed_frontmatter_is_skipped() {
        let (_dir, site) = site_with(
            &[
                ("bad.md", "---\ntitle: [oops\n---\nbody"),
                ("good.md", "---\ntitle: Good\n---\nbody"),
            ],
            SiteConfig::default(),
        );
        let records = ContentLoader::new(&site).unwrap().load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frontmatter.title, "Good");
    }

    #[test]
    fn test_strict_dates_rejects_undated_posts() {
        let config = SiteConfig {
            strict_dates: true,
            ..Default::default()
        };
        let (_dir, site) = site_with(
            &[
                ("page.md", "---\nlayout: page\n---\nno date needed"),
                ("post.md", "---\nlayout: post\ntitle: Undated\n---\nbody"),
            ],
            config,
        );
        let err = ContentLoader::new(&site).unwrap().load_records().unwrap_err();
        assert!(err.to_string().contains("Missing date"));
    }

    #[test]
    fn test_invalid_date_is_tolerated_by_default() {
        let (_dir, site) = site_with(
            &[("post.md", "---\ndate: someday\n---\nbody")],
            SiteConfig::default(),
        );
        let records = ContentLoader::new(&site).unwrap().load_records().unwrap();
        assert_eq!(records[0].frontmatter.date, None);
    }

    #[test]
    fn test_duplicate_routes_abort() {
        let (_dir, site) = site_with(
            &[
                ("a.md", "---\npath: /same/\n---\na"),
                ("b.md", "---\npath: /same/\n---\nb"),
            ],
            SiteConfig::default(),
        );
        let err = ContentLoader::new(&site).unwrap().load_records().unwrap_err();
        assert!(err.to_string().contains("/same/"));
    }

    #[test]
    fn test_long_body_excerpt_is_truncated() {
        let body = "lorem ".repeat(60);
        let (_dir, site) = site_with(&[("long.md", body.as_str())], SiteConfig::default());
        let records = ContentLoader::new(&site).unwrap().load_records().unwrap();
        let excerpt = records[0].excerpt.as_deref().unwrap();
        assert!(excerpt.ends_with('…'));
        assert!(excerpt.chars().count() <= 141);
    }
}
