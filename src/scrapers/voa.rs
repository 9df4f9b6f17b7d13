//! VOA News extractor.

use super::{all_paragraphs, element_text, first_time};
use crate::models::{ArticleRecord, Category};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1.title").unwrap());
static ARTICLE_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#article-content").unwrap());

pub fn parse(document: &Html, url: &str) -> ArticleRecord {
    let title = document
        .select(&TITLE)
        .next()
        .map(|h| element_text(h, ""))
        .unwrap_or_default();
    let raw_date = first_time(document)
        .map(|t| element_text(t, ""))
        .unwrap_or_default();

    let content = match document.select(&ARTICLE_CONTENT).next() {
        Some(body) => element_text(body, "\n"),
        None => {
            debug!(%url, "No article-content; falling back to all paragraphs");
            all_paragraphs(document, "\n")
        }
    };

    ArticleRecord {
        category: Category::VoaNews,
        title,
        raw_date,
        url: url.to_string(),
        content,
    }
}
