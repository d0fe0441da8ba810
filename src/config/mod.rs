//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::LazyLoadConfig;
pub use site::NavLink;
pub use site::SiteConfig;
pub use site::SiteMetadata;
