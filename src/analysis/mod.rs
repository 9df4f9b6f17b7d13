//! The analyzer pipeline: corpus tables in, JSON results out.
//!
//! # Submodules
//!
//! - [`normalize`]: Text cleaning and stopword filtering
//! - [`sentiment`]: Lexicon-based polarity scoring
//! - [`dates`]: Free-text date parsing and the cutoff window
//! - [`trends`]: Monthly sentiment series and score histograms
//! - [`network`]: Keyword co-occurrence graphs
//! - [`community`]: Greedy modularity clustering used by [`network`]

pub mod community;
pub mod dates;
pub mod network;
pub mod normalize;
pub mod sentiment;
pub mod trends;

use crate::config::AnalyzerSettings;
use crate::models::{AnalysisRecord, ArticleRecord};
use crate::outputs::{corpus, json};
use crate::utils::ensure_writable_dir;
use network::CooccurrenceNetwork;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};
use trends::{MonthlySentiment, SentimentDistribution};

pub const SENTIMENT_EVOLUTION_FILE: &str = "sentiment_evolution.json";
pub const EXPERT_DISTRIBUTION_FILE: &str = "expert_sentiment_distribution.json";
pub const THINK_TANK_NETWORK_FILE: &str = "network_think_tank.json";
pub const EXPERT_NETWORK_FILE: &str = "network_expert.json";
pub const MEDIA_NETWORK_FILE: &str = "network_media.json";

/// Input tables and the result directory for one analyzer run.
#[derive(Debug, Clone)]
pub struct AnalyzePaths {
    pub media: PathBuf,
    pub think_tank: PathBuf,
    pub experts: PathBuf,
    pub output_dir: PathBuf,
}

/// Monthly sentiment for the two dated partitions.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentEvolution {
    pub date_cutoff: chrono::NaiveDate,
    pub media: Vec<MonthlySentiment>,
    pub think_tank: Vec<MonthlySentiment>,
}

/// Derive the processed text and sentiment for every record.
pub fn analyze_records(records: Vec<ArticleRecord>) -> Vec<AnalysisRecord> {
    records
        .into_iter()
        .map(|article| AnalysisRecord {
            processed_text: normalize::normalize(&article.content),
            sentiment: sentiment::polarity(&article.content),
            article,
        })
        .collect()
}

/// Monthly series over the records dated on or after `cutoff`.
pub fn sentiment_series(records: &[AnalysisRecord], cutoff: chrono::NaiveDate) -> Vec<MonthlySentiment> {
    let points: Vec<_> = dates::on_or_after(records, |r| r.article.raw_date.as_str(), cutoff)
        .into_iter()
        .map(|(at, r)| (at, r.sentiment))
        .collect();
    trends::monthly_sentiment(&points)
}

/// Distribution of sentiment scores over every record, undated ones included.
pub fn sentiment_distribution(records: &[AnalysisRecord], bins: usize) -> Option<SentimentDistribution> {
    let scores: Vec<f64> = records.iter().map(|r| r.sentiment).collect();
    trends::distribution(&scores, bins)
}

/// Co-occurrence network over the processed texts of `records`.
pub fn keyword_network(records: &[AnalysisRecord], top_n: usize) -> Option<CooccurrenceNetwork> {
    let docs: Vec<&str> = records.iter().map(|r| r.processed_text.as_str()).collect();
    network::build_network(&docs, top_n)
}

fn load(label: &str, path: &Path) -> Result<Vec<AnalysisRecord>, Box<dyn Error>> {
    let records = corpus::read_corpus(path)?;
    info!(table = label, count = records.len(), "Loaded corpus table");
    Ok(analyze_records(records))
}

async fn write_network(
    label: &str,
    network: Option<CooccurrenceNetwork>,
    output_dir: &Path,
    file_name: &str,
) -> Result<(), Box<dyn Error>> {
    match network {
        Some(net) => {
            info!(
                table = label,
                nodes = net.node_count(),
                edges = net.edge_count(),
                "Network built"
            );
            json::write_json(&net.export(), output_dir, file_name).await?;
        }
        None => warn!(table = label, "Network could not be built; no file written"),
    }
    Ok(())
}

/// Entry point for the `analyze` subcommand.
///
/// # Errors
///
/// Fails without writing anything if any of the three tables is missing,
/// and fails if the output directory is not writable.
#[instrument(level = "info", skip_all, fields(output_dir = %paths.output_dir.display()))]
pub async fn run(paths: &AnalyzePaths, settings: &AnalyzerSettings) -> Result<(), Box<dyn Error>> {
    let missing: Vec<&PathBuf> = [&paths.media, &paths.think_tank, &paths.experts]
        .into_iter()
        .filter(|p| !p.exists())
        .collect();
    if !missing.is_empty() {
        for path in &missing {
            error!(path = %path.display(), "Input table not found; aborting analysis");
        }
        return Err(format!("{} input table(s) missing; nothing analyzed", missing.len()).into());
    }

    let media = load("media", &paths.media)?;
    let think_tank = load("think_tank", &paths.think_tank)?;
    let experts = load("experts", &paths.experts)?;

    let output_dir = paths.output_dir.to_string_lossy();
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(path = %output_dir, error = %e, "Output directory is not writable");
        return Err(e);
    }

    let evolution = SentimentEvolution {
        date_cutoff: settings.date_cutoff,
        media: sentiment_series(&media, settings.date_cutoff),
        think_tank: sentiment_series(&think_tank, settings.date_cutoff),
    };
    info!(
        media_months = evolution.media.len(),
        think_tank_months = evolution.think_tank.len(),
        "Computed sentiment evolution"
    );
    json::write_json(&evolution, &paths.output_dir, SENTIMENT_EVOLUTION_FILE).await?;

    match sentiment_distribution(&experts, settings.histogram_bins) {
        Some(dist) => {
            info!(count = dist.count, mean = dist.mean, "Computed expert sentiment distribution");
            json::write_json(&dist, &paths.output_dir, EXPERT_DISTRIBUTION_FILE).await?;
        }
        None => warn!("No expert records; distribution skipped"),
    }

    for (label, records, top_n, file_name) in [
        ("think_tank", &think_tank, settings.think_tank_top_n, THINK_TANK_NETWORK_FILE),
        ("experts", &experts, settings.expert_top_n, EXPERT_NETWORK_FILE),
        ("media", &media, settings.media_top_n, MEDIA_NETWORK_FILE),
    ] {
        write_network(label, keyword_network(records, top_n), &paths.output_dir, file_name).await?;
    }

    info!("Analysis complete");
    Ok(())
}
