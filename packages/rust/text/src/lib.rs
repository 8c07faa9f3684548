//! Text normalization for external post summaries and slugs.
//!
//! Summaries are cleaned with a short sequence of regex passes (see
//! [`clean_text`]); slugs are derived from titles with ASCII word rules.

mod cleanup;
mod slug;

pub use cleanup::{
    FIRST_SENTENCE_MAX_CHARS, SUMMARY_MAX_CHARS, WORD_BOUNDARY_MIN, clean_text,
    collapse_whitespace, decode_entities, extract_first_sentence, strip_tags, truncate_summary,
};
pub use slug::{has_word_chars, slugify, url_tail};
