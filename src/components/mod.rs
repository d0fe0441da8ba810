//! Page components as pure functions over explicit inputs
//!
//! Each function decides *what* a piece of a page shows; the markup itself
//! lives in the embedded templates.

pub mod helmet;
pub mod lazy;
pub mod navi;
pub mod post_template;

pub use helmet::{listing_head, post_head, Head, MetaTag};
pub use lazy::{lazy_units, LazyUnit};
pub use navi::{site_navi, NavItem};
pub use post_template::PostTemplate;
