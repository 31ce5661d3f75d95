//! Default character roster loader.

use std::path::Path;

use arena_core::CharacterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Character roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRoster {
    pub characters: Vec<CharacterTemplate>,
}

/// Loader for the shipped character templates.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster from RON text. Missing attributes default to 0 and
    /// missing slots stay empty.
    pub fn parse(content: &str) -> LoadResult<Vec<CharacterTemplate>> {
        let roster: CharacterRoster = parse_ron(content, "character roster")?;
        Ok(roster.characters)
    }
}
