//! Route and URL helpers

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Component, Path, PathBuf};

/// Characters escaped inside a route when it is placed in an absolute URL
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join the site url and a route
///
/// # Examples
/// ```ignore
/// absolute_url("https://example.com/", "/blog/") // -> "https://example.com/blog/"
/// ```
pub fn absolute_url(base: &str, route: &str) -> String {
    let base = base.trim_end_matches('/');
    let route = utf8_percent_encode(route, PATH_ESCAPES).to_string();
    if route.starts_with('/') {
        format!("{}{}", base, route)
    } else {
        format!("{}/{}", base, route)
    }
}

/// File a route is written to inside the output directory
///
/// `/blog/foo/` and `/blog/foo` both land in `blog/foo/index.html`; routes
/// that already name an `.html` file are written as-is.
pub fn output_file(public_dir: &Path, route: &str) -> PathBuf {
    let clean = route.trim_matches('/');
    if clean.is_empty() {
        return public_dir.join("index.html");
    }
    if clean.ends_with(".html") {
        return public_dir.join(clean);
    }
    public_dir.join(clean).join("index.html")
}

/// Route derived from a content file path relative to the source directory
///
/// `hello/index.md` -> `/hello/`, `notes.md` -> `/notes/`, `index.md` -> `/`
pub fn route_from_source(relative: &Path) -> String {
    let stem_path = relative.with_extension("");
    let mut parts: Vec<String> = stem_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.last().map(String::as_str) == Some("index") {
        parts.pop();
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Ensure a leading slash; the rest is kept verbatim
pub fn normalize_route(route: &str) -> String {
    let route = route.trim();
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{}", route)
    }
}

/// Routes that differ only by a trailing slash publish to the same file
pub fn same_route(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
