//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site metadata
    pub title: String,
    pub description: String,
    #[serde(alias = "siteUrl")]
    pub url: String,
    pub author: String,
    pub twitter: String,
    pub adsense: String,
    pub tagline: String,
    pub license: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub static_dir: String,
    #[serde(default)]
    pub exclude: Vec<String>,

    // Listings
    pub not_found_path: String,
    pub archive_category: String,
    pub description_length: usize,
    pub excerpt_length: usize,
    pub words_per_minute: usize,
    #[serde(default)]
    pub lazy_load: LazyLoadConfig,
    pub strict_dates: bool,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub stylesheets: Vec<String>,
    #[serde(default)]
    pub nav_links: Vec<NavLink>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Snowflake".to_string(),
            description: String::new(),
            url: "http://localhost:4000".to_string(),
            author: String::new(),
            twitter: String::new(),
            adsense: String::new(),
            tagline: String::new(),
            license: "CC-BY-SA 4.0".to_string(),

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            exclude: Vec::new(),

            not_found_path: "/404/".to_string(),
            archive_category: "archive".to_string(),
            description_length: 200,
            excerpt_length: 140,
            words_per_minute: 200,
            lazy_load: LazyLoadConfig::default(),
            strict_dates: false,

            highlight: HighlightConfig::default(),
            stylesheets: Vec::new(),
            nav_links: Vec::new(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// The read-only metadata block handed to every page
    pub fn metadata(&self) -> SiteMetadata {
        SiteMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.trim_end_matches('/').to_string(),
            author: self.author.clone(),
            twitter: self.twitter.clone(),
            adsense: self.adsense.clone(),
        }
    }
}

/// Site-wide metadata, as exposed to templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    /// Base url without a trailing slash
    pub url: String,
    pub author: String,
    pub twitter: String,
    pub adsense: String,
}

/// Placeholder geometry for lazily mounted list entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyLoadConfig {
    /// Placeholder height in pixels
    pub height: u32,
    /// Distance from the viewport, in pixels, at which an entry mounts
    pub offset: u32,
}

impl Default for LazyLoadConfig {
    fn default() -> Self {
        Self {
            height: 500,
            offset: 500,
        }
    }
}

/// Code block highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-eighties.dark".to_string(),
        }
    }
}

/// Extra navigation entry pointing outside the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.not_found_path, "/404/");
        assert_eq!(config.archive_category, "archive");
        assert_eq!(config.description_length, 200);
        assert_eq!(config.lazy_load.height, 500);
        assert_eq!(config.lazy_load.offset, 500);
        assert!(!config.strict_dates);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Snowflake
description: An extensible emulator frontend
siteUrl: https://snowflakepowe.red/
twitter: chyyran
lazy_load:
  offset: 250
nav_links:
  - name: Docs
    url: https://docs.snowflakepowe.red/
custom_key: 3
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Snowflake");
        assert_eq!(config.url, "https://snowflakepowe.red/");
        assert_eq!(config.lazy_load.offset, 250);
        assert_eq!(config.lazy_load.height, 500);
        assert_eq!(config.nav_links.len(), 1);
        assert_eq!(config.nav_links[0].name, "Docs");
        assert!(config.extra.contains_key("custom_key"));
    }

    #[test]
    fn test_metadata_trims_url() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            twitter: "someone".to_string(),
            ..Default::default()
        };
        let meta = config.metadata();
        assert_eq!(meta.url, "https://example.com");
        assert_eq!(meta.twitter, "someone");
    }
}
