//! # chip_discourse
//!
//! Research tooling for a study of US–China semiconductor discourse. Scrapes
//! think-tank and news articles into tabular corpora, then scores sentiment
//! and builds keyword co-occurrence networks over them.
//!
//! ## Features
//!
//! - Classifies article URLs by source (CNAS, CSET, CSIS, Politico, VOA News)
//! - Fetches pages with a plain client or a browser-impersonating one
//! - Extracts title, date and body with per-source HTML selectors
//! - Writes think-tank and media corpora as UTF-8 CSV
//! - Computes monthly sentiment, an expert sentiment histogram and
//!   co-occurrence networks with centrality and community labels
//!
//! ## Usage
//!
//! ```sh
//! chip_discourse collect --input data_urls.txt
//! chip_discourse analyze --output-dir ./analysis_output
//! ```
//!
//! ## Architecture
//!
//! 1. **Collect**: classify → fetch → parse each URL, strictly in order
//! 2. **Persist**: split records by source type into two CSV tables
//! 3. **Analyze**: normalize text, score sentiment, aggregate and graph
//! 4. **Output**: pretty-printed JSON files for the rendering scripts

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod collector;
mod config;
mod models;
mod outputs;
mod scrapers;
mod transport;
mod utils;

use analysis::AnalyzePaths;
use cli::{Cli, Command};
use collector::CollectPaths;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("chip_discourse starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = match config::load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Failed to load settings");
            return Err(e);
        }
    };

    match args.command {
        Command::Collect {
            input,
            think_tank_output,
            media_output,
        } => {
            let paths = CollectPaths {
                input,
                think_tank_output,
                media_output,
            };
            collector::run(&paths, &settings.collector).await?;
        }
        Command::Analyze {
            media,
            think_tank,
            experts,
            output_dir,
        } => {
            let paths = AnalyzePaths {
                media,
                think_tank,
                experts,
                output_dir,
            };
            analysis::run(&paths, &settings.analyzer).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
