//! Politico extractor.
//!
//! Politico blocks generic HTTP clients, so these pages arrive through the
//! impersonating transport. The date is taken from the `datetime` attribute
//! of the first `time` element rather than its text.

use super::{all_paragraphs, element_text, first_heading, first_time};
use crate::models::{ArticleRecord, Category};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static STORY_PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.story-text__paragraph").unwrap());

const SEPARATOR: &str = "\n\n";

pub fn parse(document: &Html, url: &str) -> ArticleRecord {
    let title = first_heading(document);
    let raw_date = first_time(document)
        .and_then(|t| t.value().attr("datetime"))
        .unwrap_or_default()
        .to_string();

    let story: Vec<String> = document
        .select(&STORY_PARAGRAPH)
        .map(|p| element_text(p, ""))
        .collect();
    let content = if story.is_empty() {
        debug!(%url, "No story-text paragraphs; falling back to all paragraphs");
        all_paragraphs(document, SEPARATOR)
    } else {
        story.join(SEPARATOR)
    };

    ArticleRecord {
        category: Category::Politico,
        title,
        raw_date,
        url: url.to_string(),
        content,
    }
}
