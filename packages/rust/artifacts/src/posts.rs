//! Post documents: YAML front matter plus a one-line body, one file per slug.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use tracing::{debug, info, instrument, warn};

use extposts_shared::{ExtPostsError, PostRecord, Result};

/// What [`write_posts`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Directory the documents were written to.
    pub dir: PathBuf,
    /// Number of files written, including overwrites.
    pub written: usize,
    /// Slugs that appeared more than once; the last record won.
    pub duplicate_slugs: Vec<String>,
}

/// Write every record to `<posts_dir>/<slug>.md`.
///
/// Records whose categories were never set get `fallback_category`. Two
/// records with the same slug overwrite each other in order.
#[instrument(skip_all, fields(posts_dir = %posts_dir.display(), records = records.len()))]
pub fn write_posts(
    posts_dir: &Path,
    records: &[PostRecord],
    fallback_category: &str,
) -> Result<WriteSummary> {
    std::fs::create_dir_all(posts_dir).map_err(|e| ExtPostsError::io(posts_dir, e))?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicate_slugs = Vec::new();

    for record in records {
        if !seen.insert(record.slug.as_str()) {
            warn!(slug = %record.slug, url = %record.redirect_url, "duplicate slug, overwriting");
            duplicate_slugs.push(record.slug.clone());
        }

        let document = render_post(record, fallback_category);
        write_atomic(posts_dir, &format!("{}.md", record.slug), &document)?;
    }

    info!(
        written = records.len(),
        duplicates = duplicate_slugs.len(),
        "post documents written"
    );

    Ok(WriteSummary {
        dir: posts_dir.to_path_buf(),
        written: records.len(),
        duplicate_slugs,
    })
}

/// Render a record as a Markdown document with front matter.
pub fn render_post(record: &PostRecord, fallback_category: &str) -> String {
    let fallback = [fallback_category.to_string()];
    let categories: &[String] = record.categories.as_deref().unwrap_or(&fallback);

    let mut doc = String::from("---\n");
    doc.push_str(&format!(
        "external_source: \"{}\"\n",
        escape_yaml_string(&record.source_name)
    ));
    doc.push_str(&format!("title: \"{}\"\n", escape_yaml_string(&record.title)));
    doc.push_str(&format!(
        "description: \"{}\"\n",
        escape_yaml_string(&record.summary)
    ));
    if let Some(published) = record.published {
        doc.push_str(&format!(
            "date: \"{}\"\n",
            published.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    doc.push_str(&format!(
        "redirect: \"{}\"\n",
        escape_yaml_string(&record.redirect_url)
    ));
    push_yaml_list(&mut doc, "tags", &record.tags);
    push_yaml_list(&mut doc, "categories", categories);
    doc.push_str("---\n");
    doc.push_str(&record.body);
    doc.push('\n');
    doc
}

fn push_yaml_list(doc: &mut String, key: &str, items: &[String]) {
    if items.is_empty() {
        doc.push_str(&format!("{key}: []\n"));
        return;
    }

    doc.push_str(&format!("{key}:\n"));
    for item in items {
        doc.push_str(&format!("  - \"{}\"\n", escape_yaml_string(item)));
    }
}

/// Escape special characters in a double-quoted YAML scalar.
fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Write to a dot-prefixed temp file, then rename over the target.
fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<()> {
    let target = dir.join(filename);
    let temp = dir.join(format!(".{filename}.tmp"));

    std::fs::write(&temp, content).map_err(|e| ExtPostsError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| ExtPostsError::io(&target, e))?;

    debug!(path = %target.display(), size = content.len(), "wrote file");
    Ok(())
}
