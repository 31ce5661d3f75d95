//! File-based LeaderboardRepository implementation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::repository::{LeaderboardEntry, LeaderboardRepository, RepositoryError, Result};

/// Fight history in `leaderboard.jsonl`, one JSON object per line.
pub struct FileLeaderboard {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl FileLeaderboard {
    pub const FILE_NAME: &'static str = "leaderboard.jsonl";

    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(Self::FILE_NAME),
            append_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardRepository for FileLeaderboard {
    fn record(&self, entry: &LeaderboardEntry) -> Result<()> {
        let mut line =
            serde_json::to_string(entry).map_err(|e| RepositoryError::Json(e.to_string()))?;
        line.push('\n');

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(RepositoryError::Io)?;
        file.write_all(line.as_bytes()).map_err(RepositoryError::Io)?;

        tracing::debug!(character = %entry.character, "Recorded fight to {}", self.path.display());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| RepositoryError::CorruptedData {
                    line: index + 1,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}
