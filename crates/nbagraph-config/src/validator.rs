//! Validation utilities and regex patterns

use crate::schema::Config;
use nbagraph_common::{parse_season_label, validate_non_empty, NbaGraphError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::SocketAddr;
use std::path::Path;

/// Hex color codes such as `#FFFFFF`.
pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern"));

/// Season labels such as `2025-26`.
pub static SEASON_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("Invalid season regex pattern"));

/// Validate a `#RRGGBB` color.
pub fn validate_hex_color(value: &str, field: &str) -> Result<()> {
    if HEX_COLOR_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(NbaGraphError::validation_field(
            format!("'{value}' is not a #RRGGBB color"),
            field,
        ))
    }
}

/// Validate an absolute http(s) URL.
pub fn validate_http_url(value: &str, field: &str) -> Result<()> {
    let parsed = url::Url::parse(value).map_err(|e| {
        NbaGraphError::validation_field(format!("'{value}' is not a valid URL: {e}"), field)
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(NbaGraphError::validation_field(
            format!("unsupported URL scheme '{other}'"),
            field,
        )),
    }
}

/// Validate a season label.
pub fn validate_season(value: &str, field: &str) -> Result<()> {
    if !SEASON_REGEX.is_match(value) {
        return Err(NbaGraphError::validation_field(
            format!("season '{value}' must look like 2025-26"),
            field,
        ));
    }
    parse_season_label(value).map(|_| ())
}

/// Validate that a path is set.
pub fn validate_path(value: &Path, field: &str) -> Result<()> {
    if value.as_os_str().is_empty() {
        Err(NbaGraphError::validation_field(format!("{field} cannot be empty"), field))
    } else {
        Ok(())
    }
}

fn validate_positive(value: u64, field: &str) -> Result<()> {
    if value == 0 {
        Err(NbaGraphError::validation_field(format!("{field} must be positive"), field))
    } else {
        Ok(())
    }
}

impl Config {
    /// Validates the whole configuration, reporting the first invalid field.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.fetch.base_url, "fetch.base_url")?;
        validate_positive(self.fetch.timeout_seconds, "fetch.timeout_seconds")?;
        validate_positive(
            u64::from(self.fetch.rate_limit_per_second),
            "fetch.rate_limit_per_second",
        )?;
        validate_non_empty(&self.fetch.user_agent, "fetch.user_agent")?;

        validate_path(&self.cache.dir, "cache.dir")?;
        validate_path(&self.output.root, "output.root")?;
        validate_path(&self.publish.public_dir, "publish.public_dir")?;
        validate_path(&self.publish.manifest_path, "publish.manifest_path")?;

        if let Some(label) = &self.season.label {
            validate_season(label, "season.label")?;
        }

        let graph = &self.graph;
        for (value, field) in [
            (&graph.background, "graph.background"),
            (&graph.plot_background, "graph.plot_background"),
            (&graph.grid, "graph.grid"),
            (&graph.text, "graph.text"),
            (&graph.muted_text, "graph.muted_text"),
            (&graph.zero_line, "graph.zero_line"),
        ] {
            validate_hex_color(value, field)?;
        }
        validate_non_empty(&graph.font_family, "graph.font_family")?;
        for (value, field) in [
            (graph.standings_width, "graph.standings_width"),
            (graph.standings_height, "graph.standings_height"),
            (graph.head_to_head_size, "graph.head_to_head_size"),
            (graph.battle_width, "graph.battle_width"),
            (graph.battle_height, "graph.battle_height"),
        ] {
            validate_positive(u64::from(value), field)?;
        }

        self.server.bind.parse::<SocketAddr>().map_err(|e| {
            NbaGraphError::validation_field(
                format!("'{}' is not a socket address: {e}", self.server.bind),
                "server.bind",
            )
        })?;

        Ok(())
    }
}
