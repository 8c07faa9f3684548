//! Summary cleanup pipeline.
//!
//! Each pass is a function `&str -> String` applied in sequence by
//! [`clean_text`]. Tag stripping is delimiter based; inputs are
//! already-extracted summary or content strings, never whole documents.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of characters kept in a cleaned summary (before `...`).
pub const SUMMARY_MAX_CHARS: usize = 150;

/// A word-boundary cut is only taken when the last space sits past this index.
pub const WORD_BOUNDARY_MIN: usize = 100;

/// Cap applied to the first sentence extracted from entry content.
pub const FIRST_SENTENCE_MAX_CHARS: usize = 500;

/// Clean a summary for a post card: strip tags, decode the common entities,
/// collapse whitespace, and truncate to [`SUMMARY_MAX_CHARS`].
pub fn clean_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut result = strip_tags(text);

    result = decode_entities(&result);
    result = collapse_whitespace(&result);
    result = truncate_summary(&result, SUMMARY_MAX_CHARS);

    result
}

/// Derive a summary from HTML content: the first sentence of its text,
/// capped at [`FIRST_SENTENCE_MAX_CHARS`] characters.
pub fn extract_first_sentence(html: &str) -> String {
    static SENTENCE_END_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

    if html.trim().is_empty() {
        return String::new();
    }

    let text = strip_tags(html);
    let text = text.trim();
    let first = SENTENCE_END_RE.split(text).next().unwrap_or(text);

    first.chars().take(FIRST_SENTENCE_MAX_CHARS).collect()
}

// ---------------------------------------------------------------------------
// Pass 1: Strip tags
// ---------------------------------------------------------------------------

/// Replace every `<...>` run with a single space.
pub fn strip_tags(text: &str) -> String {
    static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

    TAG_RE.replace_all(text, " ").to_string()
}

// ---------------------------------------------------------------------------
// Pass 2: Decode entities
// ---------------------------------------------------------------------------

/// Decode exactly `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, `&quot;` and `&#39;`.
///
/// Replacements run in that order, so `&amp;lt;` ends up as `<`. Every other
/// entity passes through untouched.
pub fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 6] = [
        ("&nbsp;", " "),
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
    ];

    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, decoded)| {
            acc.replace(entity, decoded)
        })
}

// ---------------------------------------------------------------------------
// Pass 3: Collapse whitespace
// ---------------------------------------------------------------------------

/// Collapse whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    WS_RE.replace_all(text, " ").trim().to_string()
}

// ---------------------------------------------------------------------------
// Pass 4: Truncate
// ---------------------------------------------------------------------------

/// Truncate `text` to at most `max_chars` characters followed by `...`.
///
/// Cuts at the last space at or before index `max_chars` when that space is
/// past [`WORD_BOUNDARY_MIN`]; otherwise cuts hard at `max_chars`. Text that
/// already fits is returned unchanged.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let window = &chars[..=max_chars];
    let cut = match window.iter().rposition(|&c| c == ' ') {
        Some(idx) if idx > WORD_BOUNDARY_MIN => idx,
        _ => max_chars,
    };

    let truncated: String = chars[..cut].iter().collect();
    format!("{}...", truncated.trim_end())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
