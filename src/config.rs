//! YAML-backed policy settings.
//!
//! Every field carries a default, so a missing file or a partial file is
//! fine: absent keys fall back to the values the tool has always used.
//!
//! ```yaml
//! collector:
//!   short_body_threshold: 20
//!   standard:
//!     timeout_secs: 20
//!     delay_min_ms: 1000
//!     delay_max_ms: 3000
//! analyzer:
//!   date_cutoff: 2025-01-01
//!   think_tank_top_n: 30
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Desktop Chrome 120 on Windows.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub collector: CollectorSettings,
    pub analyzer: AnalyzerSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorSettings {
    /// Bodies shorter than this many characters trigger a warning.
    pub short_body_threshold: usize,
    pub user_agent: String,
    pub standard: TransportSettings,
    pub impersonate: TransportSettings,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            short_body_threshold: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            standard: TransportSettings {
                timeout_secs: 20,
                delay_min_ms: 1000,
                delay_max_ms: 3000,
            },
            impersonate: TransportSettings {
                timeout_secs: 30,
                delay_min_ms: 2000,
                delay_max_ms: 4000,
            },
        }
    }
}

/// Timeout and politeness delay for one fetch strategy.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSettings {
    pub timeout_secs: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
}

impl TransportSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerSettings {
    /// Records dated strictly before this day are left out of the time series.
    pub date_cutoff: NaiveDate,
    pub think_tank_top_n: usize,
    pub expert_top_n: usize,
    pub media_top_n: usize,
    pub histogram_bins: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            date_cutoff: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            think_tank_top_n: 30,
            expert_top_n: 35,
            media_top_n: 30,
            histogram_bins: 15,
        }
    }
}

/// Load settings from an optional YAML file.
///
/// `None` yields [`Settings::default`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, contains
/// unknown keys, or describes an inverted delay range.
#[instrument(level = "info", skip_all)]
pub fn load_settings(path: Option<&Path>) -> Result<Settings, Box<dyn Error>> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(Settings::default());
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let settings = parse_settings(&content)
        .map_err(|e| format!("Invalid config file {}: {e}", path.display()))?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(settings)
}

fn parse_settings(content: &str) -> Result<Settings, Box<dyn Error>> {
    let settings: Settings = if content.trim().is_empty() {
        Settings::default()
    } else {
        serde_yaml::from_str(content)?
    };

    for (name, t) in [
        ("standard", &settings.collector.standard),
        ("impersonate", &settings.collector.impersonate),
    ] {
        if t.delay_min_ms > t.delay_max_ms {
            return Err(format!(
                "collector.{name}: delay_min_ms ({}) exceeds delay_max_ms ({})",
                t.delay_min_ms, t.delay_max_ms
            )
            .into());
        }
    }
    if settings.analyzer.histogram_bins == 0 {
        return Err("analyzer.histogram_bins must be at least 1".into());
    }

    Ok(settings)
}
