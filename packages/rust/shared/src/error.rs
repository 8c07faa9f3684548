//! Error types for extposts.
//!
//! Library crates use [`ExtPostsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all fatal extposts operations.
///
/// Soft, per-source feed failures are not represented here; see
/// `extposts_fetch::FeedFailure`.
#[derive(Debug, thiserror::Error)]
pub enum ExtPostsError {
    /// Configuration loading or validation error, including malformed
    /// `published_date` values on URL-list sources.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching an article page.
    #[error("network error: {0}")]
    Network(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (invalid record, serialization failure, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ExtPostsError>;

impl ExtPostsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
