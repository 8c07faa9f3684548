//! Article page extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head title").expect("valid selector"));

static PARAGRAPH_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

/// Description candidates, highest priority first.
static DESCRIPTION_SELS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        r#"head meta[name="description"]"#,
        r#"head meta[name="og:description"]"#,
        r#"head meta[property="og:description"]"#,
    ]
    .map(|css| Selector::parse(css).expect("valid selector"))
});

/// What the URL-list path keeps from an article page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// `<title>` text, trimmed; empty when the page has none.
    pub title: String,
    /// `content` of the first description meta tag that carries one.
    pub description: Option<String>,
    /// Text of every `<p>`, concatenated with no separator.
    pub body_text: String,
}

impl PageContent {
    /// Extract title, description and paragraph text from an HTML document.
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);

        let title = doc
            .select(&TITLE_SEL)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let description = DESCRIPTION_SELS.iter().find_map(|sel| {
            doc.select(sel)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(str::to_string)
        });

        let body_text = doc
            .select(&PARAGRAPH_SEL)
            .flat_map(|el| el.text())
            .collect::<String>();

        Self {
            title,
            description,
            body_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {}", path.display()))
    }

    #[test]
    fn extracts_article_fields() {
        let page = PageContent::parse(&fixture("article.html"));
        assert_eq!(page.title, "Scaling Laws, Revisited");
        assert_eq!(
            page.description.as_deref(),
            Some("What changes when <b>models</b> grow & data does not.")
        );
        assert_eq!(page.body_text, "First paragraph.Second paragraph.Footer note.");
    }

    #[test]
    fn falls_back_to_open_graph_property() {
        let page = PageContent::parse(&fixture("og-only.html"));
        assert_eq!(page.title, "");
        assert_eq!(
            page.description.as_deref(),
            Some("Only the Open Graph property is set.")
        );
        assert_eq!(page.body_text, "");
    }

    #[test]
    fn og_name_variant_is_accepted() {
        let html = r#"<html><head><meta name="og:description" content="named og"></head><body></body></html>"#;
        let page = PageContent::parse(html);
        assert_eq!(page.description.as_deref(), Some("named og"));
    }

    #[test]
    fn missing_metadata_yields_none() {
        let page = PageContent::parse("<html><body><p>Only text.</p></body></html>");
        assert_eq!(page.title, "");
        assert_eq!(page.description, None);
        assert_eq!(page.body_text, "Only text.");
    }
}
