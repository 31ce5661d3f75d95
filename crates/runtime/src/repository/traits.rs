//! Repository contracts for characters and fight history.

use arena_core::CharacterTemplate;

use super::error::Result;
use super::types::LeaderboardEntry;

/// Saved characters, keyed by save id.
///
/// Ids are assigned by the repository: a character without one gets the
/// highest existing id plus one.
pub trait SaveRepository: Send + Sync {
    /// All saved characters, ordered by id.
    fn list(&self) -> Result<Vec<CharacterTemplate>>;

    /// Inserts or replaces a character and returns its save id.
    fn upsert(&self, character: &CharacterTemplate) -> Result<u32>;

    /// Removes a saved character. Deleting an unknown id is an error.
    fn delete(&self, save_id: u32) -> Result<()>;

    fn get(&self, save_id: u32) -> Result<Option<CharacterTemplate>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.save_id == Some(save_id)))
    }
}

/// Append-only record of finished fights.
pub trait LeaderboardRepository: Send + Sync {
    fn record(&self, entry: &LeaderboardEntry) -> Result<()>;

    /// Every recorded fight, oldest first.
    fn entries(&self) -> Result<Vec<LeaderboardEntry>>;
}

/// Next save id for a roster: one past the highest id in use.
pub(crate) fn next_save_id(characters: &[CharacterTemplate]) -> u32 {
    characters
        .iter()
        .filter_map(|c| c.save_id)
        .max()
        .map_or(1, |max| max + 1)
}

/// Replaces the entry with the same id or appends a new one, returning the
/// id used.
pub(crate) fn upsert_into(characters: &mut Vec<CharacterTemplate>, character: &CharacterTemplate) -> u32 {
    let mut record = character.clone();
    let id = match record.save_id {
        Some(id) => id,
        None => next_save_id(characters),
    };
    record.save_id = Some(id);

    match characters.iter_mut().find(|c| c.save_id == Some(id)) {
        Some(existing) => *existing = record,
        None => {
            characters.push(record);
            characters.sort_by_key(|c| c.save_id);
        }
    }
    id
}
