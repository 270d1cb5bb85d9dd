//! On-device row cache
//!
//! Offline/first-paint fallback for the client: the serialized row
//! sequence lives in a single JSON file under the config dir. A broken
//! or missing cache is the same as no cache; writes never fail the
//! caller.

use std::fs;
use std::path::PathBuf;

use crate::paths;
use crate::rows::SkillRow;

pub struct SkillsCache {
    path: PathBuf,
}

impl SkillsCache {
    /// Cache at the default location (~/.loftbook/skills-table-v1.json).
    pub fn new() -> Self {
        Self {
            path: paths::cache_path(),
        }
    }

    /// Cache at an explicit path, used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cached rows, if the cache exists and parses to a row array.
    pub fn load(&self) -> Option<Vec<SkillRow>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Mirror `rows` to disk. Storage errors are logged and swallowed.
    pub fn save(&self, rows: &[SkillRow]) {
        let Ok(data) = serde_json::to_string(rows) else {
            return;
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(err) = fs::write(&self.path, data) {
            tracing::debug!("Failed to write skills cache: {err}");
        }
    }

    /// Drop the cache; the next start falls back to the seed dataset.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

impl Default for SkillsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::seed_rows;

    fn cache(dir: &tempfile::TempDir) -> SkillsCache {
        SkillsCache::at(dir.path().join("skills-table-v1.json"))
    }

    #[test]
    fn a_missing_cache_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cache(&dir).load().is_none());
    }

    #[test]
    fn saved_rows_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);

        cache.save(&seed_rows());
        assert_eq!(cache.load(), Some(seed_rows()));

        cache.clear();
        assert!(cache.load().is_none());
    }

    #[test]
    fn a_corrupt_cache_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills-table-v1.json");
        fs::write(&path, "{\"rows\": 3}").unwrap();

        assert!(SkillsCache::at(path).load().is_none());
    }
}
