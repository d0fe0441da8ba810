//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::{Layout, PostRecord};
use crate::helpers::sort_by_date_desc;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let records = site.load_records()?;
    for line in lines(&records, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// The lines `run` prints
pub fn lines(records: &[PostRecord], content_type: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts: Vec<_> = sort_by_date_desc(records)
                .into_iter()
                .filter(|r| r.is_post())
                .collect();
            out.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                out.push(format!(
                    "  {} - {} {} [{}]",
                    post.formatted_date().as_deref().unwrap_or("----/--/--"),
                    post.frontmatter.title,
                    post.path,
                    post.source
                ));
            }
        }
        "page" | "pages" => {
            let pages: Vec<_> = records.iter().filter(|r| !r.is_post()).collect();
            out.push(format!("Pages ({}):", pages.len()));
            for page in pages {
                let layout = match &page.frontmatter.layout {
                    Layout::Page => String::new(),
                    Layout::Unset => " <no layout>".to_string(),
                    other => format!(" <{}>", other),
                };
                out.push(format!(
                    "  {} {}{} [{}]",
                    page.frontmatter.title, page.path, layout, page.source
                ));
            }
        }
        "category" | "categories" => {
            let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
            for record in records {
                for category in &record.frontmatter.categories {
                    *categories.entry(category.as_str()).or_insert(0) += 1;
                }
            }
            out.push(format!("Categories ({}):", categories.len()));
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (category, count) in categories {
                out.push(format!("  {} ({})", category, count));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, category",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(title: &str, layout: Layout, date: Option<NaiveDate>, categories: &[&str]) -> PostRecord {
        let mut r = PostRecord {
            path: format!("/{}/", title),
            source: format!("{}.md", title),
            ..Default::default()
        };
        r.frontmatter.title = title.to_string();
        r.frontmatter.layout = layout;
        r.frontmatter.date = date;
        r.frontmatter.categories = categories.iter().map(|c| c.to_string()).collect();
        r
    }

    fn sample() -> Vec<PostRecord> {
        vec![
            record("older", Layout::Post, NaiveDate::from_ymd_opt(2018, 1, 1), &["news"]),
            record("newer", Layout::Post, NaiveDate::from_ymd_opt(2019, 1, 1), &["news", "archive"]),
            record("about", Layout::Page, None, &[]),
        ]
    }

    #[test]
    fn test_posts_newest_first() {
        let out = lines(&sample(), "post").unwrap();
        assert_eq!(out[0], "Posts (2):");
        assert!(out[1].contains("newer"));
        assert!(out[1].starts_with("  2019/01/01"));
        assert!(out[2].contains("older"));
    }

    #[test]
    fn test_pages() {
        let out = lines(&sample(), "pages").unwrap();
        assert_eq!(out, vec!["Pages (1):", "  about /about/ [about.md]"]);
    }

    #[test]
    fn test_categories_by_count() {
        let out = lines(&sample(), "category").unwrap();
        assert_eq!(out, vec!["Categories (2):", "  news (2)", "  archive (1)"]);
    }

    #[test]
    fn test_unknown_type() {
        assert!(lines(&sample(), "tag").is_err());
    }
}
