//! Durable per-team schedule cache.
//!
//! One pretty-printed JSON file per team at `{dir}/{code}.json`. Entries never
//! expire; they are removed only through [`TeamCache::invalidate`] or
//! [`TeamCache::clear`].

use chrono::{DateTime, Utc};
use nbagraph_common::{find_team, GameRecord, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cached schedule for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Team code the entry belongs to
    pub team: String,
    /// When the schedule was scraped
    pub fetched_at: DateTime<Utc>,
    /// Completed games, sorted by date
    pub games: Vec<GameRecord>,
}

/// File-based team cache.
#[derive(Debug, Clone)]
pub struct TeamCache {
    dir: PathBuf,
}

impl TeamCache {
    /// Create a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for `code`.
    pub fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.json"))
    }

    /// Read the entry for `code`.
    ///
    /// A file that cannot be decoded is treated as a miss so the next fetch
    /// overwrites it.
    pub fn get(&self, code: &str) -> Result<Option<CacheEntry>> {
        let path = self.path_for(code);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(team = code, path = %path.display(), error = %e, "Ignoring unreadable cache file");
                Ok(None)
            }
        }
    }

    /// Store `games` for `code`, replacing any previous entry atomically.
    pub fn put(&self, code: &str, games: &[GameRecord]) -> Result<CacheEntry> {
        std::fs::create_dir_all(&self.dir)?;

        let entry = CacheEntry {
            team: code.to_string(),
            fetched_at: Utc::now(),
            games: games.to_vec(),
        };
        let content = serde_json::to_string_pretty(&entry)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        let path = self.path_for(code);
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(team = code, games = games.len(), path = %path.display(), "Cached schedule");
        Ok(entry)
    }

    /// Remove the entry for `code`. Returns whether a file was deleted.
    pub fn invalidate(&self, code: &str) -> Result<bool> {
        let path = self.path_for(code);
        if path.exists() {
            std::fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove every cached team. Returns how many entries were deleted.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for code in self.cached_teams()? {
            if self.invalidate(&code)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Codes of all league teams with a cache file, sorted.
    pub fn cached_teams(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut teams = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // Only `{code}.json` for a league team is a cache entry.
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if find_team(stem).is_some_and(|t| t.code == stem) => {
                    teams.push(stem.to_string());
                }
                _ => debug!(path = %path.display(), "Skipping non-team file in cache dir"),
            }
        }
        teams.sort();
        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbagraph_common::test_utils::{create_temp_dir, date, game_fixtures::home_win};

    #[test]
    fn test_miss_then_hit() {
        let dir = create_temp_dir();
        let cache = TeamCache::new(dir.path().join("teams"));
        assert!(cache.get("bos").unwrap().is_none());

        let games = vec![home_win(date(2025, 10, 22), "bos", "ny")];
        let stored = cache.put("bos", &games).unwrap();
        let loaded = cache.get("bos").unwrap().unwrap();

        assert_eq!(loaded, stored);
        assert_eq!(loaded.team, "bos");
        assert_eq!(loaded.games, games);
    }

    #[test]
    fn test_put_replaces_existing_entry() {
        let dir = create_temp_dir();
        let cache = TeamCache::new(dir.path());
        cache.put("mem", &[]).unwrap();
        let games = vec![home_win(date(2025, 10, 25), "mem", "lal")];
        cache.put("mem", &games).unwrap();

        assert_eq!(cache.get("mem").unwrap().unwrap().games, games);
        assert_eq!(cache.cached_teams().unwrap(), vec!["mem".to_string()]);
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let dir = create_temp_dir();
        let cache = TeamCache::new(dir.path());
        std::fs::write(cache.path_for("okc"), "{ not json").unwrap();
        assert!(cache.get("okc").unwrap().is_none());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let dir = create_temp_dir();
        let cache = TeamCache::new(dir.path());
        for code in ["bos", "lal", "ny"] {
            cache.put(code, &[]).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        assert!(cache.invalidate("lal").unwrap());
        assert!(!cache.invalidate("lal").unwrap());
        assert_eq!(cache.cached_teams().unwrap(), vec!["bos", "ny"]);

        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.cached_teams().unwrap().is_empty());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_foreign_json_files_are_left_alone() {
        let dir = create_temp_dir();
        let cache = TeamCache::new(dir.path());
        cache.put("bos", &[]).unwrap();
        for name in ["settings.json", "sea.json"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }

        assert_eq!(cache.cached_teams().unwrap(), vec!["bos"]);
        assert_eq!(cache.clear().unwrap(), 1);
        for name in ["settings.json", "sea.json"] {
            assert!(dir.path().join(name).exists(), "{name} was deleted");
        }
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let cache = TeamCache::new("/nonexistent/nbagraph/cache");
        assert!(cache.cached_teams().unwrap().is_empty());
        assert_eq!(cache.clear().unwrap(), 0);
    }
}
