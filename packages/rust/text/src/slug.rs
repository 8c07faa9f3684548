//! Slug helpers.
//!
//! "Word" characters are ASCII only (`[A-Za-z0-9_]`), so titles written
//! entirely in other scripts count as blank and fall back to a URL-based slug.

/// Whether `text` contains at least one ASCII word character.
pub fn has_word_chars(text: &str) -> bool {
    text.chars().any(is_word_char)
}

/// Lower-case, trim, turn spaces into hyphens, and drop everything outside
/// `[A-Za-z0-9_-]`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .replace(' ', "-")
        .chars()
        .filter(|&c| is_word_char(c) || c == '-')
        .collect()
}

/// Last non-empty `/`-separated segment of a URL, or `""`.
pub fn url_tail(url: &str) -> &str {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("")
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust 2024: What's new?  "), "rust-2024-whats-new");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn slugify_keeps_underscores_and_hyphens() {
        assert_eq!(slugify("snake_case and-kebab"), "snake_case-and-kebab");
    }

    #[test]
    fn word_chars_detection() {
        assert!(has_word_chars("???a"));
        assert!(has_word_chars("_"));
        assert!(!has_word_chars("???"));
        assert!(!has_word_chars("   "));
        assert!(!has_word_chars("日本語"));
    }

    #[test]
    fn url_tail_segments() {
        assert_eq!(url_tail("https://x.com/blog/42"), "42");
        assert_eq!(url_tail("https://x.com/blog/42/"), "42");
        assert_eq!(url_tail("https://x.com"), "x.com");
        assert_eq!(url_tail(""), "");
    }
}
