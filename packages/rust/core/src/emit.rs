//! Build the final [`PostRecord`] for a normalized post.

use tracing::debug;

use extposts_shared::PostRecord;
use extposts_text::{has_word_chars, slugify, url_tail};

use crate::normalize::PostContent;

/// File-safe identifier for a post.
///
/// Titles with no ASCII word characters (blank, punctuation, other scripts)
/// fall back to `<source-slug>-<last URL segment>`.
pub fn post_slug(title: &str, source_name: &str, url: &str) -> String {
    let slug = if has_word_chars(title) {
        slugify(title)
    } else {
        String::new()
    };

    if slug.is_empty() {
        format!("{}-{}", slugify(source_name), url_tail(url))
    } else {
        slug
    }
}

/// The local post body: a single sentence pointing at the original.
pub fn post_body(source_name: &str, url: &str) -> String {
    format!("This post is available on [{source_name}]({url}).")
}

/// Assemble the record for `url` from `source_name`.
pub fn build_record(source_name: &str, url: &str, post: PostContent) -> PostRecord {
    let slug = post_slug(&post.title, source_name, url);

    debug!(
        %slug,
        content_chars = post.content.chars().count(),
        "emitting post record"
    );

    PostRecord {
        source_name: source_name.to_string(),
        title: post.title,
        summary: post.summary,
        published: post.published,
        redirect_url: url.to_string(),
        tags: post.tags,
        categories: post.categories,
        body: post_body(source_name, url),
        slug,
    }
}
