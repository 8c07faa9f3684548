//! Application configuration for extposts.
//!
//! The config lives next to the site sources, `extposts.toml` by default.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtPostsError, Result};
use crate::types::SourceConfig;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "extposts.toml";

// ---------------------------------------------------------------------------
// Config structs (matching extposts.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where and how posts are written.
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP settings for feed requests.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Ordered list of external sources.
    #[serde(default)]
    pub external_sources: Vec<SourceConfig>,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory the post documents are written to.
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Optional path of the posts search index (JSON).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_index: Option<PathBuf>,

    /// Category written for posts whose categories were never set.
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            search_index: None,
            fallback_category: default_fallback_category(),
        }
    }
}

fn default_posts_dir() -> PathBuf {
    "_posts".into()
}
fn default_fallback_category() -> String {
    "external-posts".into()
}

/// `[fetch]` section. Applies to feed requests only; article pages are
/// fetched with default client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// `User-Agent` header sent with feed requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `Accept` header sent with feed requests.
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Per-request timeout for feed requests, in seconds.
    #[serde(default = "default_feed_timeout_secs")]
    pub feed_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            feed_timeout_secs: default_feed_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; extposts external posts fetcher)".into()
}
fn default_accept() -> String {
    "application/rss+xml, application/xml, text/xml".into()
}
fn default_feed_timeout_secs() -> u64 {
    10
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the config from `path`. Returns defaults if the file does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ExtPostsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ExtPostsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file at `path`. Refuses to overwrite an existing file.
pub fn init_config(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Err(ExtPostsError::config(format!(
            "{} already exists, not overwriting",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExtPostsError::io(parent, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ExtPostsError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ExtPostsError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}
