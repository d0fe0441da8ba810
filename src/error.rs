//! Typed errors for content loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning content files into records
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Failed to render {path:?}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("Unrecognized date {value:?} in {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Missing date in {0:?} (strict_dates is enabled)")]
    MissingDate(PathBuf),

    #[error("Route {route} is claimed by both {first} and {second}")]
    DuplicatePath {
        route: String,
        first: String,
        second: String,
    },
}
