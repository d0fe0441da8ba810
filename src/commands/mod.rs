//! CLI commands

pub mod clean;
pub mod generate;
pub mod list;
pub mod nest;
pub mod new;
