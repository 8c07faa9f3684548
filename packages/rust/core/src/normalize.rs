//! Turn fetched material into [`PostContent`], the shape the emitter consumes.

use chrono::{DateTime, Utc};

use extposts_fetch::PageContent;
use extposts_shared::FeedEntry;
use extposts_text::{clean_text, extract_first_sentence};

/// Normalized post fields, independent of where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PostContent {
    pub title: String,
    /// Raw entry content or concatenated paragraph text.
    pub content: String,
    /// Cleaned card summary, at most 150 chars plus `...`.
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    /// `None` means categories were never set for this post.
    pub categories: Option<Vec<String>>,
}

/// Normalize one feed entry.
pub fn from_feed_entry(entry: &FeedEntry) -> PostContent {
    PostContent {
        title: entry.title.clone().unwrap_or_default(),
        content: entry.content.clone().unwrap_or_default(),
        summary: clean_text(&raw_summary(entry)),
        published: entry.published,
        tags: merge_tags(entry.categories.as_deref(), entry.tags.as_deref()),
        categories: Some(Vec::new()),
    }
}

/// Normalize a fetched article page with its configured publish date.
pub fn from_page(page: PageContent, published: DateTime<Utc>) -> PostContent {
    PostContent {
        summary: clean_text(page.description.as_deref().unwrap_or_default()),
        title: page.title,
        content: page.body_text,
        published: Some(published),
        tags: Vec::new(),
        categories: None,
    }
}

/// Categories followed by tags, deduplicated in order of first appearance.
pub fn merge_tags(categories: Option<&[String]>, tags: Option<&[String]>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    for tag in categories.unwrap_or_default().iter().chain(tags.unwrap_or_default()) {
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }

    merged
}

/// The entry summary when it has text, else the first sentence of the content.
fn raw_summary(entry: &FeedEntry) -> String {
    match entry.summary.as_deref() {
        Some(summary) if !summary.trim().is_empty() => summary.to_string(),
        _ => entry
            .content
            .as_deref()
            .map(extract_first_sentence)
            .unwrap_or_default(),
    }
}
