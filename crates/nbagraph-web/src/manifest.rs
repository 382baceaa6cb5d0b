//! Append-only manifest of published URLs.
//!
//! The manifest is the routing table of the static server: each entry maps
//! a frozen public URL to a file below the public directory. Entries are
//! only ever appended.

use chrono::{DateTime, NaiveDate, Utc};
use nbagraph_common::{GraphKind, NbaGraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One published image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Public URL path, e.g. `/nba-head-to-head/2025-12-01.png`
    pub url_path: String,
    /// File path relative to the public directory
    pub file: PathBuf,
    /// Graph kind, e.g. `standings-east`
    #[serde(with = "graph_kind")]
    pub graph: GraphKind,
    /// Date the image is published under
    pub date: NaiveDate,
    /// When the entry was appended
    pub published_at: DateTime<Utc>,
}

/// Graph kinds are stored by their display name.
mod graph_kind {
    use nbagraph_common::GraphKind;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(kind: &GraphKind, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(kind)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GraphKind, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

/// The YAML manifest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read the manifest at `path`. A missing file is an empty manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No manifest yet");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write the manifest atomically via a temp file in the same directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let content = serde_yaml::to_string(self)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(path = %path.display(), entries = self.entries.len(), "Saved manifest");
        Ok(())
    }

    /// Entry published at `url_path`.
    pub fn get(&self, url_path: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.url_path == url_path)
    }

    pub fn contains(&self, url_path: &str) -> bool {
        self.get(url_path).is_some()
    }

    /// Append `entry`; a URL can only be published once.
    pub fn append(&mut self, entry: ManifestEntry) -> Result<()> {
        if self.contains(&entry.url_path) {
            return Err(NbaGraphError::publish(format!(
                "{} is already published",
                entry.url_path
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Entries of one graph kind in publication order.
    pub fn entries_for(&self, kind: GraphKind) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(move |e| e.graph == kind)
    }

    /// Most recent entry of `kind` by publication date.
    pub fn latest(&self, kind: GraphKind) -> Option<&ManifestEntry> {
        self.entries_for(kind).max_by_key(|e| (e.date, e.published_at))
    }

    /// Latest entry of every kind that has been published.
    pub fn latest_by_kind(&self) -> Vec<&ManifestEntry> {
        GraphKind::ALL
            .iter()
            .filter_map(|kind| self.latest(*kind))
            .collect()
    }

    /// URL path to absolute file path, resolved against `public_dir`.
    pub fn routes(&self, public_dir: &Path) -> HashMap<String, PathBuf> {
        self.entries
            .iter()
            .map(|e| (e.url_path.clone(), public_dir.join(&e.file)))
            .collect()
    }
}
