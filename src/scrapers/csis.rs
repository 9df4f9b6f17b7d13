//! CSIS (Center for Strategic and International Studies) extractor.
//!
//! Analysis pages split the body across several `div.wysiwyg-wrapper`
//! blocks; only their non-empty paragraphs are kept. Older layouts use
//! `div[data-block-plugin-id="text-block"]` instead, and pages with neither
//! fall back to every paragraph. Paragraphs are joined by a blank line.

use super::{all_paragraphs, first_heading, first_text, paragraphs_in};
use crate::models::{ArticleRecord, Category};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("p.date").unwrap());
static WRAPPER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.wysiwyg-wrapper").unwrap());
static TEXT_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[data-block-plugin-id="text-block"]"#).unwrap());

const SEPARATOR: &str = "\n\n";

pub fn parse(document: &Html, url: &str) -> ArticleRecord {
    let title = first_heading(document);
    let raw_date = first_text(document, &DATE);

    let wrappers: Vec<_> = document.select(&WRAPPER).collect();
    let content = if !wrappers.is_empty() {
        wrappers
            .into_iter()
            .flat_map(paragraphs_in)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    } else {
        let blocks: Vec<_> = document.select(&TEXT_BLOCK).collect();
        if !blocks.is_empty() {
            debug!(%url, "No wysiwyg-wrapper; using text blocks");
            blocks
                .into_iter()
                .flat_map(paragraphs_in)
                .collect::<Vec<_>>()
                .join(SEPARATOR)
        } else {
            debug!(%url, "No known body container; falling back to all paragraphs");
            all_paragraphs(document, SEPARATOR)
        }
    };

    ArticleRecord {
        category: Category::Csis,
        title,
        raw_date,
        url: url.to_string(),
        content,
    }
}
