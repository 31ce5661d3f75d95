//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use arena_core::CharacterTemplate;

use crate::repository::traits::upsert_into;
use crate::repository::{RepositoryError, Result, SaveRepository};

/// Saved characters in `characters.json` under a base directory.
///
/// Writers serialize on a mutex so concurrent upserts cannot interleave
/// their read-modify-write.
pub struct FileSaveRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSaveRepository {
    pub const FILE_NAME: &'static str = "characters.json";

    /// Create a repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(Self::FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<CharacterTemplate>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    fn write_all(&self, characters: &[CharacterTemplate]) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        // Write to temp file
        let json = serde_json::to_string_pretty(characters)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved {} characters to {}", characters.len(), self.path.display());
        Ok(())
    }
}

impl SaveRepository for FileSaveRepository {
    fn list(&self) -> Result<Vec<CharacterTemplate>> {
        self.read_all()
    }

    fn upsert(&self, character: &CharacterTemplate) -> Result<u32> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut characters = self.read_all()?;
        let id = upsert_into(&mut characters, character);
        self.write_all(&characters)?;
        Ok(id)
    }

    fn delete(&self, save_id: u32) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut characters = self.read_all()?;
        let before = characters.len();
        characters.retain(|c| c.save_id != Some(save_id));
        if characters.len() == before {
            return Err(RepositoryError::UnknownSave(save_id));
        }
        self.write_all(&characters)?;

        tracing::info!("Deleted saved character {}", save_id);
        Ok(())
    }
}
