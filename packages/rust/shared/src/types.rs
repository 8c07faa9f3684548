//! Core domain types: source descriptors, feed entries, and post records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source descriptors
// ---------------------------------------------------------------------------

/// One `[[external_sources]]` entry from the configuration file.
///
/// The raw shape is permissive so that malformed descriptors survive config
/// loading and can be reported individually; use [`SourceConfig::kind`] to
/// classify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Human-readable source name, used for provenance and fallback slugs.
    pub name: String,

    /// RSS/Atom feed URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss_url: Option<String>,

    /// Explicit article URLs with externally supplied publish dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostRef>>,
}

/// A single article listed under a URL-list source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRef {
    /// Article URL.
    pub url: String,
    /// Publish date as written in the config. Kept untyped and optional so
    /// that a wrong or missing value is reported when the source is
    /// ingested, not when config loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<toml::Value>,
}

/// Classified shape of a [`SourceConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceKind<'a> {
    /// A feed source.
    Feed { url: &'a str },
    /// A list of discrete article URLs.
    UrlList { posts: &'a [PostRef] },
    /// Neither or both shapes present.
    Invalid { reason: &'static str },
}

impl SourceConfig {
    /// Classify this descriptor. Exactly one of `rss_url` or `posts` must be set.
    pub fn kind(&self) -> SourceKind<'_> {
        match (&self.rss_url, &self.posts) {
            (Some(url), None) => SourceKind::Feed { url },
            (None, Some(posts)) => SourceKind::UrlList { posts },
            (Some(_), Some(_)) => SourceKind::Invalid {
                reason: "both `rss_url` and `posts` are set",
            },
            (None, None) => SourceKind::Invalid {
                reason: "neither `rss_url` nor `posts` is set",
            },
        }
    }
}

impl SourceKind<'_> {
    /// Short label for listings and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feed { .. } => "feed",
            Self::UrlList { .. } => "url-list",
            Self::Invalid { .. } => "invalid",
        }
    }
}

// ---------------------------------------------------------------------------
// FeedEntry
// ---------------------------------------------------------------------------

/// One item decoded from an RSS/Atom document, before normalization.
///
/// Every field a feed may or may not carry is explicitly optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    /// Link to the original article.
    pub url: Option<String>,
    /// Entry title.
    pub title: Option<String>,
    /// Raw HTML content.
    pub content: Option<String>,
    /// Explicit summary/description.
    pub summary: Option<String>,
    /// Publish timestamp.
    pub published: Option<DateTime<Utc>>,
    /// Category terms.
    pub categories: Option<Vec<String>>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// PostRecord
// ---------------------------------------------------------------------------

/// The canonical post record produced for every ingested external item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Name of the source this post came from.
    pub source_name: String,
    /// Post title (may be blank).
    pub title: String,
    /// Cleaned, truncated summary for post cards.
    pub summary: String,
    /// Publish timestamp, UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// The external URL this post redirects to. Identity key.
    pub redirect_url: String,
    /// Deduplicated tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Categories. `None` means "never set" and is replaced by the site's
    /// fallback label when written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// File-safe identifier.
    pub slug: String,
    /// Short pointer sentence used as the local post body.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(rss_url: Option<&str>, posts: Option<Vec<PostRef>>) -> SourceConfig {
        SourceConfig {
            name: "My Blog".into(),
            rss_url: rss_url.map(String::from),
            posts,
        }
    }

    fn post_ref() -> PostRef {
        PostRef {
            url: "https://example.com/a".into(),
            published_date: Some(toml::Value::String("2024-01-05".into())),
        }
    }

    #[test]
    fn feed_source_kind() {
        let src = source(Some("https://example.com/feed.xml"), None);
        assert_eq!(
            src.kind(),
            SourceKind::Feed {
                url: "https://example.com/feed.xml"
            }
        );
        assert_eq!(src.kind().label(), "feed");
    }

    #[test]
    fn url_list_source_kind() {
        let src = source(None, Some(vec![post_ref()]));
        match src.kind() {
            SourceKind::UrlList { posts } => assert_eq!(posts.len(), 1),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn mixed_and_absent_shapes_are_invalid() {
        let both = source(Some("https://example.com/feed.xml"), Some(vec![post_ref()]));
        assert!(matches!(both.kind(), SourceKind::Invalid { .. }));

        let neither = source(None, None);
        let SourceKind::Invalid { reason } = neither.kind() else {
            panic!("expected invalid");
        };
        assert!(reason.contains("neither"));
    }

    #[test]
    fn record_serialization_skips_unset_fields() {
        let record = PostRecord {
            source_name: "My Blog".into(),
            title: "Hello".into(),
            summary: "".into(),
            published: None,
            redirect_url: "https://example.com/hello".into(),
            tags: vec![],
            categories: None,
            slug: "hello".into(),
            body: "This post is available on [My Blog](https://example.com/hello).".into(),
        };

        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("published"));
        assert!(!json.contains("categories"));

        let parsed: PostRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, record);
    }
}
