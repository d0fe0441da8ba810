//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts `categories: news` as well as `categories: [news, release]`
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

/// Raw front-matter block of a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub layout: Option<String>,
    pub title: Option<String>,
    pub path: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub categories: Vec<String>,
    pub date: Option<String>,

    /// Keys the generator does not interpret, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a content file into its front-matter and body.
    ///
    /// Files without a recognizable block yield the default front-matter and
    /// the whole input as body. A block that is present but malformed is an
    /// error carrying the parser message.
    pub fn parse(content: &str) -> Result<(Self, &str), String> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if let Some((block, body)) = split_yaml_block(content) {
            if block.trim().is_empty() {
                return Ok((Self::default(), body));
            }
            if !looks_like_yaml(block) {
                // A leading `---` used as a horizontal rule
                return Ok((Self::default(), content));
            }
            let fm = serde_yaml::from_str(block).map_err(|e| e.to_string())?;
            return Ok((fm, body));
        }

        if let Some((block, body)) = split_json_block(content) {
            let fm = serde_json::from_str(block).map_err(|e| e.to_string())?;
            return Ok((fm, body));
        }

        Ok((Self::default(), content))
    }
}

/// `---\n<yaml>\n---\n<body>`
fn split_yaml_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.trim_start_matches(['\n', '\r']);
    if let Some(body) = rest.strip_prefix("---") {
        return Some(("", body.trim_start_matches(['\n', '\r'])));
    }
    let end = rest.find("\n---")?;
    let body = &rest[end + 4..];
    Some((&rest[..end], body.trim_start_matches(['\n', '\r'])))
}

/// `;;;<json>;;;<body>` or a bare leading JSON object
fn split_json_block(content: &str) -> Option<(&str, &str)> {
    if let Some(rest) = content.strip_prefix(";;;") {
        let end = rest.find(";;;")?;
        let body = &rest[end + 3..];
        return Some((&rest[..end], body.trim_start_matches(['\n', '\r'])));
    }

    if !content.starts_with('{') {
        return None;
    }
    // The first complete JSON value ends the block; braces inside strings
    // are handled by the parser
    let mut values =
        serde_json::Deserializer::from_str(content).into_iter::<serde_json::Value>();
    match values.next() {
        Some(Ok(_)) => {
            let end = values.byte_offset();
            let body = &content[end..];
            Some((&content[..end], body.trim_start_matches(['\n', '\r'])))
        }
        _ => None,
    }
}

/// At least one `key: value` line whose key is a plain identifier
fn looks_like_yaml(block: &str) -> bool {
    block.lines().map(str::trim).any(|line| {
        if line.is_empty() || line.starts_with('#') {
            return false;
        }
        let Some((key, value)) = line.split_once(':') else {
            return false;
        };
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp")
            && (value.is_empty() || value.starts_with(' '))
    })
}
