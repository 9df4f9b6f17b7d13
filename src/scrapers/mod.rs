//! Source-specific article extractors.
//!
//! Each supported source has its own submodule exposing a single
//! `parse(document, url) -> ArticleRecord` function. Dispatch is a closed
//! `match` over [`Category`]; the source set is fixed.
//!
//! # Supported Sources
//!
//! | Source | Module | Body container | Fallback | Joiner |
//! |--------|--------|----------------|----------|--------|
//! | CNAS | [`cnas`] | `div.wysiwyg-wrapper` | all `p` | `\n` |
//! | CSET | [`cset`] | `div.entry-content` | all `p` | `\n` |
//! | CSIS | [`csis`] | `p` in `div.wysiwyg-wrapper` | `p` in text blocks, then all `p` | `\n\n` |
//! | Politico | [`politico`] | `p.story-text__paragraph` | all `p` | `\n\n` |
//! | VOA News | [`voa`] | `div#article-content` | all `p` | `\n` |
//!
//! # Common Patterns
//!
//! - A selector that matches nothing yields an empty field, never an error
//! - Dates are kept exactly as found; normalization happens in the analyzer
//! - Text is gathered node by node: each text node is trimmed, empty nodes
//!   are dropped, and the rest joined with the extractor's separator

use crate::models::{ArticleRecord, Category};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;

pub mod cnas;
pub mod cset;
pub mod csis;
pub mod politico;
pub mod voa;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

/// Parse raw HTML with the extractor for `category`.
///
/// # Errors
///
/// Returns an error for [`Category::Unknown`], which has no extractor, and
/// when the page yields no title, no date and no body: such a page is not an
/// article (a consent wall, an error page, a script-rendered shell).
pub fn extract(category: Category, html: &str, url: &str) -> Result<ArticleRecord, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let record = match category {
        Category::Cnas => cnas::parse(&document, url),
        Category::Cset => cset::parse(&document, url),
        Category::Csis => csis::parse(&document, url),
        Category::Politico => politico::parse(&document, url),
        Category::VoaNews => voa::parse(&document, url),
        Category::Unknown => return Err(format!("no extractor for {url}").into()),
    };
    if record.title.is_empty() && record.raw_date.is_empty() && record.content.is_empty() {
        return Err(format!("no title, date or body found in {url}").into());
    }
    Ok(record)
}

/// Text of `element`, each text node trimmed, empty nodes dropped, joined by
/// `separator`. Script and style contents are not text.
pub(crate) fn element_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style" | "template"))
            });
            if hidden { None } else { Some(text.trim()) }
        })
        .filter(|t| !t.is_empty())
        .join(separator)
}

/// Text of the first match of `selector`, or an empty string.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|e| element_text(e, ""))
        .unwrap_or_default()
}

/// Text of every `p` under `element`, in document order.
pub(crate) fn paragraphs_in(element: ElementRef<'_>) -> Vec<String> {
    element.select(&PARAGRAPH).map(|p| element_text(p, "")).collect()
}

/// Every `p` in the document joined by `separator`, the shared fallback body.
pub(crate) fn all_paragraphs(document: &Html, separator: &str) -> String {
    document
        .select(&PARAGRAPH)
        .map(|p| element_text(p, ""))
        .join(separator)
}

/// Text of the first `h1`.
pub(crate) fn first_heading(document: &Html) -> String {
    first_text(document, &H1)
}

/// The first `time` element, if any.
pub(crate) fn first_time(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&TIME).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_text_strips_and_joins() {
        let doc = Html::parse_document(
            "<div id='x'>  Chip <b> export </b>\n\n <i>rules</i>  </div>",
        );
        let sel = Selector::parse("#x").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el, ""), "Chipexportrules");
        assert_eq!(element_text(el, "\n"), "Chip\nexport\nrules");
    }

    #[test]
    fn test_element_text_skips_scripts() {
        let doc = Html::parse_document(
            "<div id='x'><p>Visible</p><script>var x = 1;</script><style>p{}</style></div>",
        );
        let sel = Selector::parse("#x").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el, "|"), "Visible");
    }

    #[test]
    fn test_all_paragraphs_in_document_order() {
        let doc = Html::parse_document("<p>One</p><div><p> Two </p></div><p></p><p>Three</p>");
        assert_eq!(all_paragraphs(&doc, "\n"), "One\nTwo\n\nThree");
    }

    #[test]
    fn test_extract_unknown_is_error() {
        assert!(extract(Category::Unknown, "<html></html>", "https://x.example").is_err());
    }

    #[test]
    fn test_extract_sets_category_and_url() {
        let html = "<html><body><h1>T</h1></body></html>";
        let record = extract(Category::Cnas, html, "https://www.cnas.org/p").unwrap();
        assert_eq!(record.category, Category::Cnas);
        assert_eq!(record.url, "https://www.cnas.org/p");
        assert_eq!(record.title, "T");
    }

    #[test]
    fn test_extract_page_without_article_is_error() {
        for category in [
            Category::Cnas,
            Category::Cset,
            Category::Csis,
            Category::Politico,
            Category::VoaNews,
        ] {
            assert!(extract(category, "", "https://example.org/a").is_err());
            assert!(
                extract(category, "<html><body><div>Enable JavaScript</div></body></html>", "https://example.org/a")
                    .is_err()
            );
        }
    }

    #[test]
    fn test_extract_missing_fields_stay_empty() {
        let record = extract(Category::Politico, "<h1>Only a title</h1>", "https://www.politico.com/a").unwrap();
        assert_eq!(record.title, "Only a title");
        assert_eq!(record.raw_date, "");
        assert_eq!(record.content, "");
    }
}
