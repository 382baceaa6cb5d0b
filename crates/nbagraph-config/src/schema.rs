//! Configuration schema definitions.
//!
//! Every section is `#[serde(default)]` so a partial YAML file only needs to
//! name the values it changes.

use chrono::NaiveDate;
use nbagraph_common::{season_label, season_start_year, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for NBA Graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schedule scraping.
    pub fetch: FetchConfig,
    /// Per-team schedule cache.
    pub cache: CacheConfig,
    /// Rendered image output.
    pub output: OutputConfig,
    /// Season labelling.
    pub season: SeasonConfig,
    /// Graph styling.
    pub graph: GraphConfig,
    /// Publishing of frozen URLs.
    pub publish: PublishConfig,
    /// Static image server.
    pub server: ServerConfig,
    /// Logging.
    pub logging: LoggingSettings,
}

/// ESPN schedule fetch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL of the schedule site, without trailing slash.
    pub base_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum requests per second.
    pub rate_limit_per_second: u32,
}

impl FetchConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Schedule cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one `{code}.json` per team.
    pub dir: PathBuf,
}

/// Rendered image output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root under which `.standings/`, `.head_to_head/` and
    /// `.conference_battle/` are created.
    pub root: PathBuf,
}

/// Season configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeasonConfig {
    /// Season label such as `2025-26`. Derived from the current date when unset.
    pub label: Option<String>,
}

impl SeasonConfig {
    /// The configured label, or the label of the season in progress on `today`.
    pub fn resolve(&self, today: NaiveDate) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| season_label(season_start_year(today)))
    }
}

/// Graph styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Image background.
    pub background: String,
    /// Plot area background.
    pub plot_background: String,
    /// Grid lines.
    pub grid: String,
    /// Primary text.
    pub text: String,
    /// Secondary text (subtitles, tick labels).
    pub muted_text: String,
    /// The `.500` / zero line.
    pub zero_line: String,
    /// Font family for all labels.
    pub font_family: String,
    /// Directory of `{code}.png` team logos plus `east.png` and `west.png`.
    /// Missing files fall back to color swatches and code labels.
    pub logo_dir: PathBuf,
    /// Standings image width.
    pub standings_width: u32,
    /// Standings image height.
    pub standings_height: u32,
    /// Head-to-head image edge length (square).
    pub head_to_head_size: u32,
    /// Conference battle image width.
    pub battle_width: u32,
    /// Conference battle image height.
    pub battle_height: u32,
}

/// Publishing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Root of the public tree; files mirror their URL path below it.
    pub public_dir: PathBuf,
    /// Append-only YAML manifest of published URLs.
    pub manifest_path: PathBuf,
}

/// Static server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind: String,
}

/// Logging configuration as stored in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level or `EnvFilter` directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file.
    pub file: Option<String>,
}

impl LoggingSettings {
    /// Convert to the runtime logging configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.clone(),
            include_targets: true,
        }
    }
}
