//! Feed body parsing via `feed-rs`.
//!
//! Every way a feed can fail to parse is folded into a [`FeedFailure`], which
//! callers treat as a soft, per-source failure.

use feed_rs::model::Entry;
use feed_rs::parser::{self, ParseErrorKind, ParseFeedError};
use tracing::debug;

use extposts_shared::FeedEntry;

/// Why a feed source produced no entries. Never fatal to the build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedFailure {
    /// The server answered with a non-success status.
    #[error("failed to fetch feed (HTTP {0})")]
    Status(u16),

    /// The response body was empty or whitespace only.
    #[error("feed response body is empty")]
    EmptyBody,

    /// The body is not a format the parser recognizes (e.g. an HTML page).
    #[error("no valid parser for feed format (feed URL: {url})")]
    UnrecognizedFormat { url: String },

    /// Any other parser error.
    #[error("failed to parse feed: {0}")]
    Parse(String),

    /// The request itself failed (invalid URL, timeout, connection error).
    #[error("failed to fetch feed: {0}")]
    Network(String),
}

/// Parse a feed body into entries, preserving document order.
pub fn parse_feed(body: &str, feed_url: &str) -> Result<Vec<FeedEntry>, FeedFailure> {
    if body.trim().is_empty() {
        return Err(FeedFailure::EmptyBody);
    }

    let feed = parser::parse(body.as_bytes()).map_err(|e| match e {
        ParseFeedError::ParseError(ParseErrorKind::NoFeedRoot) => FeedFailure::UnrecognizedFormat {
            url: feed_url.to_string(),
        },
        other => FeedFailure::Parse(other.to_string()),
    })?;

    debug!(entries = feed.entries.len(), "parsed feed document");

    Ok(feed.entries.into_iter().map(entry_from_model).collect())
}

/// Map a `feed-rs` entry onto the optional-field [`FeedEntry`] schema.
///
/// Category terms become `categories`. A label is only the display name of
/// its term, so it is not kept, and `feed-rs` has no separate tag list.
fn entry_from_model(entry: Entry) -> FeedEntry {
    let url = entry
        .links
        .first()
        .map(|link| link.href.clone())
        .or_else(|| is_http_url(&entry.id).then(|| entry.id.clone()));

    let categories: Vec<String> = entry.categories.iter().map(|c| c.term.clone()).collect();

    FeedEntry {
        url,
        title: entry.title.map(|t| t.content),
        content: entry.content.and_then(|c| c.body),
        summary: entry.summary.map(|t| t.content),
        published: entry.published.or(entry.updated),
        categories: non_empty(categories),
        tags: None,
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/feeds")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {}", path.display()))
    }

    #[test]
    fn parses_rss2_entries_in_order() {
        let entries = parse_feed(&fixture("rss2.xml"), "https://blog.example.com/feed").unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.url.as_deref(), Some("https://blog.example.com/posts/hello-world"));
        assert_eq!(first.title.as_deref(), Some("Hello, World!"));
        assert_eq!(
            first.categories,
            Some(vec!["rust".to_string(), "web".to_string(), "rust".to_string()])
        );
        assert_eq!(first.tags, None);
        assert!(first.summary.as_deref().unwrap().contains("A first post"));
        assert_eq!(
            first.published,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap())
        );

        let second = &entries[1];
        assert_eq!(second.title.as_deref(), Some("???"));
        assert_eq!(second.summary, None);
        assert!(second.content.as_deref().unwrap().contains("No summary here."));
        assert_eq!(second.categories, None);
    }

    #[test]
    fn parses_atom_entry_categories() {
        let entries = parse_feed(&fixture("atom.xml"), "https://atom.example.com/feed").unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.url.as_deref(), Some("https://atom.example.com/entries/1"));
        assert_eq!(
            entry.categories,
            Some(vec!["rust".to_string(), "async".to_string()])
        );
        assert_eq!(entry.tags, None);
        assert_eq!(entry.summary.as_deref(), Some("Short atom summary."));
        assert_eq!(
            entry.published,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn category_labels_are_not_extra_tags() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Labels</title>
  <id>urn:uuid:labels</id>
  <updated>2024-03-02T12:00:00Z</updated>
  <entry>
    <title>Labelled</title>
    <link href="https://atom.example.com/entries/2"/>
    <id>urn:uuid:labelled</id>
    <updated>2024-03-02T12:00:00Z</updated>
    <category term="machine-learning" label="Machine Learning"/>
    <category term="rust" label="Rust"/>
  </entry>
</feed>"#;
        let entries = parse_feed(atom, "https://atom.example.com/feed").unwrap();

        assert_eq!(
            entries[0].categories,
            Some(vec!["machine-learning".to_string(), "rust".to_string()])
        );
        assert_eq!(entries[0].tags, None);
    }

    #[test]
    fn empty_body_is_reported() {
        assert_eq!(parse_feed("  \n", "https://x.com/feed"), Err(FeedFailure::EmptyBody));
    }

    #[test]
    fn html_body_is_unrecognized_format() {
        let html = "<html><head><title>Not a feed</title></head><body><p>hi</p></body></html>";
        assert_eq!(
            parse_feed(html, "https://x.com/feed"),
            Err(FeedFailure::UnrecognizedFormat {
                url: "https://x.com/feed".into()
            })
        );
    }

    #[test]
    fn failure_messages_name_the_problem() {
        let failure = FeedFailure::UnrecognizedFormat {
            url: "https://x.com/feed".into(),
        };
        assert!(failure.to_string().contains("https://x.com/feed"));
        assert_eq!(FeedFailure::Status(404).to_string(), "failed to fetch feed (HTTP 404)");
    }
}
