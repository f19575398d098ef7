//! Best-score persistence.
//!
//! One small JSON file next to the user's home directory. A missing or
//! unreadable file means no recorded score yet; a corrupt file is treated
//! the same way rather than aborting the game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const STORE_FILE: &str = ".voxfall_highscore.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
struct StoredScore {
    best_score: u32,
}

/// Loads and records the best score across game sessions.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Open the store at an explicit path, reading any previous best.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = read_best(&path).unwrap_or(0);
        Self { path, best }
    }

    /// Open the store at the default per-user location.
    pub fn open_default() -> Self {
        Self::open(default_path())
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a score, writing through to disk when it beats the best.
    pub fn record(&mut self, score: u32) -> Result<()> {
        if score <= self.best {
            return Ok(());
        }
        self.best = score;
        let json = serde_json::to_string(&StoredScore { best_score: score })?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing high score to {}", self.path.display()))?;
        Ok(())
    }
}

fn read_best(path: &Path) -> Option<u32> {
    let raw = fs::read_to_string(path).ok()?;
    let stored: StoredScore = serde_json::from_str(&raw).ok()?;
    Some(stored.best_score)
}

/// Default store location: the user's home directory, falling back to the
/// current directory when HOME is unset.
pub fn default_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voxfall_test_{}_{}.json", tag, std::process::id()))
    }

    #[test]
    fn test_missing_file_means_zero() {
        let path = temp_store_path("missing");
        let _ = fs::remove_file(&path);
        let store = HighScoreStore::open(&path);
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_record_and_reload() {
        let path = temp_store_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut store = HighScoreStore::open(&path);
        store.record(42).unwrap();
        assert_eq!(store.best(), 42);

        let reloaded = HighScoreStore::open(&path);
        assert_eq!(reloaded.best(), 42);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lower_score_does_not_overwrite() {
        let path = temp_store_path("lower");
        let _ = fs::remove_file(&path);

        let mut store = HighScoreStore::open(&path);
        store.record(100).unwrap();
        store.record(50).unwrap();
        assert_eq!(store.best(), 100);

        let reloaded = HighScoreStore::open(&path);
        assert_eq!(reloaded.best(), 100);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_zero() {
        let path = temp_store_path("corrupt");
        fs::write(&path, "not json at all").unwrap();

        let store = HighScoreStore::open(&path);
        assert_eq!(store.best(), 0);

        let _ = fs::remove_file(&path);
    }
}
