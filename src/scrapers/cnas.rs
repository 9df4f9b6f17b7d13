//! CNAS (Center for a New American Security) extractor.
//!
//! Publication pages carry the title in the first `h1`, the date as the text
//! of the first `time`, and the article body inside `div.wysiwyg-wrapper`.
//! Pages without the wrapper fall back to every paragraph on the page.

use super::{all_paragraphs, element_text, first_heading, first_time};
use crate::models::{ArticleRecord, Category};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static WRAPPER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.wysiwyg-wrapper").unwrap());

pub fn parse(document: &Html, url: &str) -> ArticleRecord {
    let title = first_heading(document);
    let raw_date = first_time(document)
        .map(|t| element_text(t, ""))
        .unwrap_or_default();

    let content = match document.select(&WRAPPER).next() {
        Some(wrapper) => element_text(wrapper, "\n"),
        None => {
            debug!(%url, "No wysiwyg-wrapper; falling back to all paragraphs");
            all_paragraphs(document, "\n")
        }
    };

    ArticleRecord {
        category: Category::Cnas,
        title,
        raw_date,
        url: url.to_string(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primary_container() {
        let html = r#"
            <html><body>
              <h1> Countering China's Chip Ambitions </h1>
              <time datetime="2025-02-03">February 3, 2025</time>
              <p>Sidebar teaser</p>
              <div class="wysiwyg-wrapper">
                <p>First paragraph.</p>
                <p>Second <a href="/reports/chips">linked</a> paragraph.</p>
              </div>
            </body></html>"#;
        let doc = Html::parse_document(html);
        let record = parse(&doc, "https://www.cnas.org/publications/x");
        assert_eq!(record.title, "Countering China's Chip Ambitions");
        assert_eq!(record.raw_date, "February 3, 2025");
        assert_eq!(record.content, "First paragraph.\nSecond\nlinked\nparagraph.");
        assert_eq!(record.category, Category::Cnas);
    }

    #[test]
    fn test_parse_fallback_paragraphs() {
        let html = "<html><body><h1>T</h1><p>Alpha</p><div><p>Beta</p></div></body></html>";
        let doc = Html::parse_document(html);
        let record = parse(&doc, "https://www.cnas.org/publications/y");
        assert_eq!(record.content, "Alpha\nBeta");
        assert_eq!(record.raw_date, "");
    }
}
