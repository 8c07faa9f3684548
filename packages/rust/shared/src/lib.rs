//! Shared types, error model, and configuration for extposts.
//!
//! This crate is the foundation depended on by all other extposts crates.
//! It provides:
//! - [`ExtPostsError`]: the unified error type
//! - Domain types ([`SourceConfig`], [`SourceKind`], [`FeedEntry`], [`PostRecord`])
//! - Configuration ([`AppConfig`], [`SiteConfig`], [`FetchConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, FetchConfig, SiteConfig, init_config, load_config,
    load_config_from,
};
pub use error::{ExtPostsError, Result};
pub use types::{FeedEntry, PostRecord, PostRef, SourceConfig, SourceKind};
