//! Command-line interface definitions for chip_discourse.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every path can be provided via a flag or an environment variable, and
//! defaults to the file names the research workflow has always used.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for chip_discourse.
///
/// # Examples
///
/// ```sh
/// # Scrape every URL in data_urls.txt into the two corpus tables
/// chip_discourse collect
///
/// # Analyze the tables with tuned policy constants
/// chip_discourse --config policy.yaml analyze --output-dir ./analysis
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, global = true, env = "CHIP_DISCOURSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape the listed article URLs into the think-tank and media tables
    Collect {
        /// Newline-delimited list of article URLs
        #[arg(short, long, env = "CHIP_DISCOURSE_URLS", default_value = "data_urls.txt")]
        input: PathBuf,

        /// Output table for CNAS, CSET and CSIS articles
        #[arg(
            long,
            env = "CHIP_DISCOURSE_THINK_TANK",
            default_value = "us_think_tank_data.csv"
        )]
        think_tank_output: PathBuf,

        /// Output table for Politico and VOA News articles
        #[arg(
            long,
            env = "CHIP_DISCOURSE_MEDIA",
            default_value = "us_mainstream_media_data.csv"
        )]
        media_output: PathBuf,
    },

    /// Score sentiment, build keyword networks and write JSON results
    Analyze {
        /// Mainstream media table
        #[arg(
            long,
            env = "CHIP_DISCOURSE_MEDIA",
            default_value = "us_mainstream_media_data.csv"
        )]
        media: PathBuf,

        /// Think-tank table
        #[arg(
            long,
            env = "CHIP_DISCOURSE_THINK_TANK",
            default_value = "us_think_tank_data.csv"
        )]
        think_tank: PathBuf,

        /// Expert commentary table
        #[arg(
            long,
            env = "CHIP_DISCOURSE_EXPERTS",
            default_value = "us_experts_twitter_data.csv"
        )]
        experts: PathBuf,

        /// Directory for the JSON results
        #[arg(short, long, env = "CHIP_DISCOURSE_OUTPUT_DIR", default_value = "analysis_output")]
        output_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_defaults() {
        let cli = Cli::parse_from(["chip_discourse", "collect"]);
        assert!(cli.config.is_none());
        match cli.command {
            Command::Collect {
                input,
                think_tank_output,
                media_output,
            } => {
                assert_eq!(input, PathBuf::from("data_urls.txt"));
                assert_eq!(think_tank_output, PathBuf::from("us_think_tank_data.csv"));
                assert_eq!(media_output, PathBuf::from("us_mainstream_media_data.csv"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_analyze_flags_and_global_config() {
        let cli = Cli::parse_from([
            "chip_discourse",
            "analyze",
            "--experts",
            "/tmp/experts.csv",
            "-o",
            "/tmp/out",
            "--config",
            "policy.yaml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("policy.yaml")));
        match cli.command {
            Command::Analyze {
                experts,
                output_dir,
                media,
                ..
            } => {
                assert_eq!(experts, PathBuf::from("/tmp/experts.csv"));
                assert_eq!(output_dir, PathBuf::from("/tmp/out"));
                assert_eq!(media, PathBuf::from("us_mainstream_media_data.csv"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["chip_discourse"]).is_err());
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
