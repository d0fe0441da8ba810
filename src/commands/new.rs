//! Create a new post or page

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers::{format_post_date, normalize_route};
use crate::Site;

/// Write `<source_dir>/<slug>/index.md` with its front-matter filled in.
///
/// Posts default to the `/blog/<slug>/` route, pages to `/<slug>/`.
pub fn create_post(site: &Site, title: &str, layout: &str, path: Option<&str>) -> Result<PathBuf> {
    if !matches!(layout, "post" | "page") {
        anyhow::bail!("Unknown layout: {}. Available: post, page", layout);
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let route = match path {
        Some(p) => normalize_route(p),
        None if layout == "post" => format!("/blog/{}/", slug),
        None => format!("/{}/", slug),
    };

    let target_dir = site.source_dir.join(&slug);
    let file_path = target_dir.join("index.md");
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let mut content = format!(
        "---\nlayout: {}\ntitle: {}\npath: {}\n",
        layout,
        yaml_string(title),
        route
    );
    if layout == "post" {
        content.push_str(&format!("date: {}\ncategories:\n", format_post_date(&today)));
    }
    content.push_str("---\n\n");

    fs::create_dir_all(&target_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created {} at {:?}", layout, file_path);

    Ok(file_path)
}

/// Quote a scalar when YAML would otherwise misread it
fn yaml_string(s: &str) -> String {
    let needs_quotes = s.contains(": ")
        || s.contains(" #")
        || s.starts_with(|c: char| "[]{}&*!|>'\"%@`#-?,".contains(c))
        || s.trim() != s;
    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Layout;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_roundtrips_through_loader() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Snowflake: Year One", "post", None).unwrap();
        assert_eq!(path, site.source_dir.join("snowflake-year-one").join("index.md"));

        let records = site.load_records().unwrap();
        assert_eq!(records.len(), 1);
        let fm = &records[0].frontmatter;
        assert_eq!(fm.title, "Snowflake: Year One");
        assert_eq!(fm.path, "/blog/snowflake-year-one/");
        assert_eq!(fm.layout, Layout::Post);
        assert!(fm.date.is_some());
    }

    #[test]
    fn test_create_page_with_custom_path() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_post(&site, "About", "page", Some("about-us/")).unwrap();
        let records = site.load_records().unwrap();
        assert_eq!(records[0].path, "/about-us/");
        assert_eq!(records[0].frontmatter.layout, Layout::Page);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        create_post(&site, "Twice", "post", None).unwrap();
        assert!(create_post(&site, "Twice", "post", None).is_err());
    }

    #[test]
    fn test_unknown_layout() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(create_post(&site, "X", "draft", None).is_err());
    }

    #[test]
    fn test_yaml_string() {
        assert_eq!(yaml_string("Plain title"), "Plain title");
        assert_eq!(yaml_string("a: b"), "\"a: b\"");
        assert_eq!(yaml_string("\"quoted\""), "\"\\\"quoted\\\"\"");
    }
}
