//! Data models for scraped articles and their analyzed representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Category`]: The source an article URL belongs to
//! - [`Partition`]: The output table a category is written into
//! - [`ArticleRecord`]: One scraped article, exactly as persisted to CSV
//! - [`AnalysisRecord`]: An article plus the fields derived by the analyzer
//!
//! The CSV column names (`category`, `Title`, `Date`, `URL`, `Content`) are
//! fixed by the downstream tooling, hence the `#[serde(rename)]` attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The source an article URL belongs to.
///
/// Classification is done once per URL by [`Category::classify`].
/// [`Category::Unknown`] is terminal: the collector skips such URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CNAS")]
    Cnas,
    #[serde(rename = "CSET")]
    Cset,
    #[serde(rename = "CSIS")]
    Csis,
    #[serde(rename = "Politico")]
    Politico,
    #[serde(rename = "VOA News")]
    VoaNews,
    #[serde(other, rename = "Unknown")]
    Unknown,
}

/// Domain substrings tested in priority order.
const DOMAIN_RULES: [(&str, Category); 5] = [
    ("cnas.org", Category::Cnas),
    ("cset.georgetown.edu", Category::Cset),
    ("csis.org", Category::Csis),
    ("politico.com", Category::Politico),
    ("voanews.com", Category::VoaNews),
];

impl Category {
    /// Classify a URL by the domain substrings of its host.
    ///
    /// If the string does not parse as a URL (or has no host) the whole string
    /// is matched instead. The function is total: anything unmatched is
    /// [`Category::Unknown`].
    pub fn classify(url: &str) -> Category {
        let parsed = url::Url::parse(url.trim()).ok();
        let haystack = parsed
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or(url)
            .to_ascii_lowercase();

        DOMAIN_RULES
            .iter()
            .find(|(needle, _)| haystack.contains(needle))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Unknown)
    }

    /// The output table this category is persisted into, if any.
    pub fn partition(&self) -> Option<Partition> {
        match self {
            Category::Cnas | Category::Cset | Category::Csis => Some(Partition::ThinkTank),
            Category::Politico | Category::VoaNews => Some(Partition::Media),
            Category::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cnas => "CNAS",
            Category::Cset => "CSET",
            Category::Csis => "CSIS",
            Category::Politico => "Politico",
            Category::VoaNews => "VOA News",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two collector output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    ThinkTank,
    Media,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::ThinkTank => f.write_str("think tank"),
            Partition::Media => f.write_str("media"),
        }
    }
}

/// A scraped article, one row of a corpus table.
///
/// Created once per successfully fetched-and-parsed URL and never updated.
/// Any field the extractor could not locate is an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "category", default = "unknown_category")]
    pub category: Category,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Raw date text or attribute value, uncleaned.
    #[serde(rename = "Date", default)]
    pub raw_date: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(rename = "Content", default)]
    pub content: String,
}

fn unknown_category() -> Category {
    Category::Unknown
}

/// An article augmented with the fields the analyzer derives.
///
/// Derived fields are recomputed on every run and never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub article: ArticleRecord,
    /// Lowercased, URL-stripped, punctuation-stripped, stopword-filtered tokens.
    pub processed_text: String,
    /// Polarity in [-1, 1].
    pub sentiment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_sources() {
        assert_eq!(Category::classify("https://www.cnas.org/publications/x"), Category::Cnas);
        assert_eq!(
            Category::classify("https://cset.georgetown.edu/article/chips/"),
            Category::Cset
        );
        assert_eq!(Category::classify("https://www.csis.org/analysis/y"), Category::Csis);
        assert_eq!(
            Category::classify("https://www.politico.com/news/2025/01/10/chips"),
            Category::Politico
        );
        assert_eq!(
            Category::classify("https://www.voanews.com/a/export-controls/1.html"),
            Category::VoaNews
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(Category::classify("https://unknown-site.example/y"), Category::Unknown);
        assert_eq!(Category::classify(""), Category::Unknown);
        assert_eq!(Category::classify("not a url at all"), Category::Unknown);
    }

    #[test]
    fn test_classify_matches_host_not_path() {
        assert_eq!(
            Category::classify("https://unknown-site.example/ref/cnas.org"),
            Category::Unknown
        );
    }

    #[test]
    fn test_classify_falls_back_to_raw_string() {
        assert_eq!(Category::classify("www.csis.org/analysis/z"), Category::Csis);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let urls = [
            "https://www.cnas.org/publications/x",
            "https://unknown-site.example/y",
            "https://www.voanews.com/a/1.html",
        ];
        for url in urls {
            assert_eq!(Category::classify(url), Category::classify(url));
        }
    }

    #[test]
    fn test_partition_membership() {
        assert_eq!(Category::Cnas.partition(), Some(Partition::ThinkTank));
        assert_eq!(Category::Cset.partition(), Some(Partition::ThinkTank));
        assert_eq!(Category::Csis.partition(), Some(Partition::ThinkTank));
        assert_eq!(Category::Politico.partition(), Some(Partition::Media));
        assert_eq!(Category::VoaNews.partition(), Some(Partition::Media));
        assert_eq!(Category::Unknown.partition(), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::VoaNews.to_string(), "VOA News");
        assert_eq!(Category::Cnas.to_string(), "CNAS");
    }

    #[test]
    fn test_article_record_json_uses_column_names() {
        let record = ArticleRecord {
            category: Category::VoaNews,
            title: "Chips".to_string(),
            raw_date: "January 10, 2025".to_string(),
            url: "https://www.voanews.com/a/1.html".to_string(),
            content: "Body".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""category":"VOA News""#));
        assert!(json.contains(r#""Title":"Chips""#));
        assert!(json.contains(r#""URL":"#));
    }
}
