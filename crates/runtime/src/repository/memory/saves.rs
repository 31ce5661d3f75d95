//! In-memory SaveRepository implementation.

use std::sync::RwLock;

use arena_core::CharacterTemplate;

use crate::repository::traits::upsert_into;
use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of SaveRepository.
#[derive(Default)]
pub struct InMemorySaveRepo {
    characters: RwLock<Vec<CharacterTemplate>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn list(&self) -> Result<Vec<CharacterTemplate>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.clone())
    }

    fn upsert(&self, character: &CharacterTemplate) -> Result<u32> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(upsert_into(&mut characters, character))
    }

    fn delete(&self, save_id: u32) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let before = characters.len();
        characters.retain(|c| c.save_id != Some(save_id));
        if characters.len() == before {
            return Err(RepositoryError::UnknownSave(save_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> CharacterTemplate {
        CharacterTemplate {
            name: name.to_owned(),
            ..CharacterTemplate::default()
        }
    }

    #[test]
    fn new_characters_get_increasing_ids() {
        let repo = InMemorySaveRepo::new();
        assert_eq!(repo.upsert(&named("A")).unwrap(), 1);
        assert_eq!(repo.upsert(&named("B")).unwrap(), 2);

        repo.delete(1).unwrap();
        // ids follow the highest in use, not the count
        assert_eq!(repo.upsert(&named("C")).unwrap(), 3);
    }

    #[test]
    fn upsert_with_id_replaces() {
        let repo = InMemorySaveRepo::new();
        let id = repo.upsert(&named("A")).unwrap();

        let mut updated = named("A");
        updated.save_id = Some(id);
        updated.xp = 99;
        assert_eq!(repo.upsert(&updated).unwrap(), id);

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].xp, 99);
        assert_eq!(repo.get(id).unwrap().map(|c| c.xp), Some(99));
    }

    #[test]
    fn deleting_unknown_id_fails() {
        let repo = InMemorySaveRepo::new();
        assert!(matches!(repo.delete(5), Err(RepositoryError::UnknownSave(5))));
    }
}
