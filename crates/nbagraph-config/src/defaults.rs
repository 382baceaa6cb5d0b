//! Default values for every configuration section.

use crate::schema::*;
use nbagraph_common::LogFormat;
use std::path::PathBuf;

/// Default schedule site.
pub const DEFAULT_BASE_URL: &str = "https://www.espn.com";

/// Desktop browser User-Agent; the schedule pages reject obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "nbagraph.yaml";

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            season: SeasonConfig::default(),
            graph: GraphConfig::default(),
            publish: PublishConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 30,
            rate_limit_per_second: 2,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".teams"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            plot_background: "#fafafa".to_string(),
            grid: "#e5e5e5".to_string(),
            text: "#1f2937".to_string(),
            muted_text: "#6b7280".to_string(),
            zero_line: "#9ca3af".to_string(),
            font_family: "sans-serif".to_string(),
            logo_dir: PathBuf::from("img/logos"),
            standings_width: 1200,
            standings_height: 1350,
            head_to_head_size: 1000,
            battle_width: 900,
            battle_height: 450,
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            manifest_path: PathBuf::from("public/manifest.yaml"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
        }
    }
}
