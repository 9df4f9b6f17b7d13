//! The collector pipeline: URL list in, two CSV corpus tables out.
//!
//! Each URL goes through `classify → fetch → parse → accumulate`, and drops
//! to "skipped" at the first failure. Skips are logged and never abort the
//! run. URLs are processed strictly one at a time; the only waiting is the
//! transport's politeness delay.

use crate::config::CollectorSettings;
use crate::models::{ArticleRecord, Category, Partition};
use crate::outputs::corpus;
use crate::scrapers;
use crate::transport::{Fetch, ImpersonateFetch, StandardFetch};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Why a URL produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownSource,
    FetchFailed,
    ParseFailed,
}

/// The result of running one URL through the pipeline.
#[derive(Debug)]
pub enum UrlOutcome {
    Collected(ArticleRecord),
    Skipped(SkipReason),
}

/// Records gathered by one run, plus skip counts.
#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<ArticleRecord>,
    pub unknown: usize,
    pub fetch_failed: usize,
    pub parse_failed: usize,
}

impl Collection {
    fn absorb(mut self, outcome: UrlOutcome) -> Self {
        match outcome {
            UrlOutcome::Collected(record) => self.records.push(record),
            UrlOutcome::Skipped(SkipReason::UnknownSource) => self.unknown += 1,
            UrlOutcome::Skipped(SkipReason::FetchFailed) => self.fetch_failed += 1,
            UrlOutcome::Skipped(SkipReason::ParseFailed) => self.parse_failed += 1,
        }
        self
    }
}

/// The two fetch strategies, picked per source.
#[derive(Debug)]
pub struct Transports<S, I> {
    pub standard: S,
    pub impersonate: I,
}

impl<S: Fetch, I: Fetch> Transports<S, I> {
    /// Fetch with the strategy `category` needs. Politico gets the
    /// impersonating client; every other known source the standard one.
    async fn fetch_for(&self, category: Category, url: &str) -> Option<String> {
        match category {
            Category::Politico => self.impersonate.fetch(url).await,
            _ => self.standard.fetch(url).await,
        }
    }
}

/// Paths for one collector run.
#[derive(Debug, Clone)]
pub struct CollectPaths {
    pub input: PathBuf,
    pub think_tank_output: PathBuf,
    pub media_output: PathBuf,
}

/// Read a newline-delimited URL list, ignoring blank lines.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_url_list(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read URL list {}: {e}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Run one URL through classify, fetch and parse.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn process_url<S: Fetch, I: Fetch>(
    url: &str,
    transports: &Transports<S, I>,
    short_body_threshold: usize,
) -> UrlOutcome {
    let category = Category::classify(url);
    if category == Category::Unknown {
        warn!(%url, "Unknown source domain; skipping");
        return UrlOutcome::Skipped(SkipReason::UnknownSource);
    }

    let Some(html) = transports.fetch_for(category, url).await else {
        return UrlOutcome::Skipped(SkipReason::FetchFailed);
    };
    if html.is_empty() {
        warn!(%url, "Empty response body; skipping");
        return UrlOutcome::Skipped(SkipReason::FetchFailed);
    }

    match scrapers::extract(category, &html, url) {
        Ok(record) => {
            let body_chars = record.content.chars().count();
            if body_chars < short_body_threshold {
                warn!(%url, body_chars, threshold = short_body_threshold, "Content empty or too short");
            }
            info!(source = %category, title = %truncate_for_log(&record.title, 20), "Extracted article");
            UrlOutcome::Collected(record)
        }
        Err(e) => {
            error!(%url, error = %e, "Parse failed; skipping");
            UrlOutcome::Skipped(SkipReason::ParseFailed)
        }
    }
}

/// Process every URL in order, threading the accumulator through the loop.
#[instrument(level = "info", skip_all, fields(total = urls.len()))]
pub async fn collect<S: Fetch, I: Fetch>(
    urls: &[String],
    transports: &Transports<S, I>,
    short_body_threshold: usize,
) -> Collection {
    let total = urls.len();
    let collection = stream::iter(urls.iter().enumerate())
        .fold(Collection::default(), |acc, (i, url)| async move {
            info!(
                "[{}/{}] Processing [{}]: {}",
                i + 1,
                total,
                Category::classify(url),
                url
            );
            acc.absorb(process_url(url, transports, short_body_threshold).await)
        })
        .await;

    info!(
        collected = collection.records.len(),
        unknown = collection.unknown,
        fetch_failed = collection.fetch_failed,
        parse_failed = collection.parse_failed,
        "Collection finished"
    );
    collection
}

/// Split records into the think-tank and media tables, preserving order.
pub fn partition_records(records: Vec<ArticleRecord>) -> (Vec<ArticleRecord>, Vec<ArticleRecord>) {
    let mut think_tank = Vec::new();
    let mut media = Vec::new();
    for record in records {
        match record.category.partition() {
            Some(Partition::ThinkTank) => think_tank.push(record),
            Some(Partition::Media) => media.push(record),
            None => {}
        }
    }
    (think_tank, media)
}

/// Write both partitions. Empty partitions produce no file.
///
/// # Returns
///
/// The paths actually written.
pub fn persist(
    records: Vec<ArticleRecord>,
    paths: &CollectPaths,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::new();
    if records.is_empty() {
        warn!("No data scraped; nothing to write");
        return Ok(written);
    }

    let (think_tank, media) = partition_records(records);
    for (partition, rows, path) in [
        (Partition::ThinkTank, &think_tank, &paths.think_tank_output),
        (Partition::Media, &media, &paths.media_output),
    ] {
        if rows.is_empty() {
            info!(%partition, "Partition empty; no file written");
            continue;
        }
        corpus::write_corpus(path, rows)?;
        info!(%partition, path = %path.display(), count = rows.len(), "Wrote corpus table");
        written.push(path.clone());
    }
    Ok(written)
}

/// Entry point for the `collect` subcommand.
///
/// # Errors
///
/// Fails before any network work if the URL list is missing, and fails if
/// an output table cannot be written. Per-URL failures never surface here.
#[instrument(level = "info", skip_all)]
pub async fn run(paths: &CollectPaths, settings: &CollectorSettings) -> Result<(), Box<dyn Error>> {
    let urls = match read_url_list(&paths.input) {
        Ok(urls) => urls,
        Err(e) => {
            error!(path = %paths.input.display(), error = %e, "URL list not found");
            return Err(e);
        }
    };
    info!(count = urls.len(), "Loaded URL list");

    let transports = Transports {
        standard: StandardFetch::new(&settings.user_agent, settings.standard.clone())?,
        impersonate: ImpersonateFetch::new(settings.impersonate.clone())?,
    };

    let collection = collect(&urls, &transports, settings.short_body_threshold).await;
    persist(collection.records, paths)?;
    Ok(())
}
