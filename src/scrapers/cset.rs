//! CSET (Center for Security and Emerging Technology) extractor.
//!
//! The title lives in `header.article-header h1`, with `h1.entry-title` as a
//! second choice. The date is the `div.meta-date` inside that same header;
//! there is no date when the header is missing.

use super::{all_paragraphs, element_text};
use crate::models::{ArticleRecord, Category};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static HEADER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("header.article-header").unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static ENTRY_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1.entry-title").unwrap());
static META_DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.meta-date").unwrap());
static ENTRY_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.entry-content").unwrap());

pub fn parse(document: &Html, url: &str) -> ArticleRecord {
    let header = document.select(&HEADER).next();

    let title = header
        .and_then(|h| h.select(&H1).next())
        .or_else(|| document.select(&ENTRY_TITLE).next())
        .map(|e| element_text(e, ""))
        .unwrap_or_default();

    let raw_date = header
        .and_then(|h| h.select(&META_DATE).next())
        .map(|e| element_text(e, ""))
        .unwrap_or_default();

    let content = match document.select(&ENTRY_CONTENT).next() {
        Some(body) => element_text(body, "\n"),
        None => {
            debug!(%url, "No entry-content; falling back to all paragraphs");
            all_paragraphs(document, "\n")
        }
    };

    ArticleRecord {
        category: Category::Cset,
        title,
        raw_date,
        url: url.to_string(),
        content,
    }
}
