//! Write-once publishing of rendered images.

use crate::manifest::{Manifest, ManifestEntry};
use chrono::{NaiveDate, Utc};
use nbagraph_common::{GraphKind, NbaGraphError, Result};
use nbagraph_config::Config;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Copies rendered images to frozen public URLs and records them.
#[derive(Debug, Clone)]
pub struct Publisher {
    output_root: PathBuf,
    public_dir: PathBuf,
    manifest_path: PathBuf,
}

impl Publisher {
    pub fn new(
        output_root: impl Into<PathBuf>,
        public_dir: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            output_root: output_root.into(),
            public_dir: public_dir.into(),
            manifest_path: manifest_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.output.root,
            &config.publish.public_dir,
            &config.publish.manifest_path,
        )
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Current manifest contents.
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::load(&self.manifest_path)
    }

    /// Publish the rendered image of `kind` under `date`.
    ///
    /// Fails without touching anything when the URL is already in the
    /// manifest, the destination file exists, or nothing has been rendered.
    #[instrument(skip(self), fields(graph = %kind, %date))]
    pub fn publish(&self, kind: GraphKind, date: NaiveDate) -> Result<ManifestEntry> {
        let url_path = kind.public_url(date);
        let mut manifest = self.manifest()?;
        if manifest.contains(&url_path) {
            return Err(NbaGraphError::publish(format!(
                "{url_path} is already published"
            )));
        }

        let file = PathBuf::from(url_path.trim_start_matches('/'));
        let destination = self.public_dir.join(&file);
        if destination.exists() {
            return Err(NbaGraphError::publish(format!(
                "{} already exists",
                destination.display()
            )));
        }

        let source = kind.output_path(&self.output_root);
        let bytes = std::fs::read(&source).map_err(|e| {
            NbaGraphError::publish(format!(
                "no rendered image at {} ({e}); generate the graph first",
                source.display()
            ))
        })?;

        write_new_file(&destination, &bytes)?;

        let entry = ManifestEntry {
            url_path,
            file,
            graph: kind,
            date,
            published_at: Utc::now(),
        };
        manifest.append(entry.clone())?;
        if let Err(e) = manifest.save(&self.manifest_path) {
            warn!(path = %destination.display(), error = %e, "Manifest write failed, removing published file");
            let _ = std::fs::remove_file(&destination);
            return Err(e);
        }

        info!(url = %entry.url_path, bytes = bytes.len(), "Published graph");
        Ok(entry)
    }

    /// Published entries, optionally restricted to one kind.
    pub fn published(&self, kind: Option<GraphKind>) -> Result<Vec<ManifestEntry>> {
        let manifest = self.manifest()?;
        Ok(manifest
            .entries
            .into_iter()
            .filter(|e| kind.map_or(true, |k| e.graph == k))
            .collect())
    }

    /// Latest published entry of every kind.
    pub fn latest(&self) -> Result<Vec<ManifestEntry>> {
        let manifest = self.manifest()?;
        Ok(manifest.latest_by_kind().into_iter().cloned().collect())
    }
}

/// Write `bytes` to `path`, failing if `path` already exists.
fn write_new_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| NbaGraphError::publish(format!("{} has no parent", path.display())))?;
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist_noclobber(path).map_err(|e| {
        NbaGraphError::publish(format!("{} already exists: {}", path.display(), e.error))
    })?;
    Ok(())
}
