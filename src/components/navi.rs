//! Top navigation

use serde::Serialize;

use crate::config::NavLink;

pub const HOME_ROUTE: &str = "/";
pub const BLOG_ROUTE: &str = "/blog";

/// One entry of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub active: bool,
    pub external: bool,
}

/// Home is active only on the root route
pub fn is_home_active(current_path: &str) -> bool {
    current_path == HOME_ROUTE
}

/// Blog is active on every route below `/blog`
pub fn is_blog_active(current_path: &str) -> bool {
    current_path.starts_with(BLOG_ROUTE)
}

/// Navigation entries for a page at `current_path`; configured external
/// links follow Home and Blog and are never active
pub fn site_navi(current_path: &str, links: &[NavLink]) -> Vec<NavItem> {
    let mut items = vec![
        NavItem {
            name: "Home".to_string(),
            href: HOME_ROUTE.to_string(),
            active: is_home_active(current_path),
            external: false,
        },
        NavItem {
            name: "Blog".to_string(),
            href: BLOG_ROUTE.to_string(),
            active: is_blog_active(current_path),
            external: false,
        },
    ];

    items.extend(links.iter().map(|link| NavItem {
        name: link.name.clone(),
        href: link.url.clone(),
        active: false,
        external: true,
    }));

    items
}
