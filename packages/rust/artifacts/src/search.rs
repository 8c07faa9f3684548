//! Posts search index for the site's command palette.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use extposts_shared::{ExtPostsError, PostRecord, Result};

/// Section label every external post is listed under.
pub const POSTS_SECTION: &str = "Posts";

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// `post-<slug>`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub section: String,
    /// Where selecting the entry navigates to.
    pub url: String,
}

impl SearchEntry {
    pub fn from_record(record: &PostRecord) -> Self {
        Self {
            id: format!("post-{}", record.slug),
            title: record.title.clone(),
            description: record.summary.clone(),
            section: POSTS_SECTION.to_string(),
            url: record.redirect_url.clone(),
        }
    }
}

/// Build index entries in record order.
pub fn build_search_index(records: &[PostRecord]) -> Vec<SearchEntry> {
    records.iter().map(SearchEntry::from_record).collect()
}

/// Write the index as pretty-printed JSON. Returns the number of entries.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_search_index(path: &Path, records: &[PostRecord]) -> Result<usize> {
    let entries = build_search_index(records);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExtPostsError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| ExtPostsError::validation(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| ExtPostsError::io(path, e))?;

    debug!(entries = entries.len(), "wrote search index");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str) -> PostRecord {
        PostRecord {
            source_name: "My Blog".into(),
            title: format!("Title {slug}"),
            summary: "Short.".into(),
            published: None,
            redirect_url: format!("https://blog.example.com/{slug}"),
            tags: vec![],
            categories: None,
            slug: slug.into(),
            body: String::new(),
        }
    }

    #[test]
    fn entries_mirror_records() {
        let entries = build_search_index(&[record("a"), record("b")]);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            SearchEntry {
                id: "post-a".into(),
                title: "Title a".into(),
                description: "Short.".into(),
                section: "Posts".into(),
                url: "https://blog.example.com/a".into(),
            }
        );
    }

    #[test]
    fn writes_json_array() {
        let dir = std::env::temp_dir().join(format!("extposts-search-{}", uuid::Uuid::now_v7()));
        let path = dir.join("assets").join("posts-search.json");

        let count = write_search_index(&path, &[record("a")]).unwrap();
        assert_eq!(count, 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<SearchEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0].id, "post-a");
        assert_eq!(parsed[0].section, POSTS_SECTION);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
