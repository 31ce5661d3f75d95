//! Action catalog loader.

use std::path::Path;

use arena_core::ActionDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Action catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCatalog {
    pub actions: Vec<ActionDefinition>,
}

/// Loader for action definitions from RON files.
pub struct ActionLoader;

impl ActionLoader {
    /// Load action definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ActionDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse action definitions from RON text.
    ///
    /// Effect targets are checked here: a stat name outside the recognized
    /// set fails the whole catalog.
    pub fn parse(content: &str) -> LoadResult<Vec<ActionDefinition>> {
        let catalog: ActionCatalog = parse_ron(content, "action catalog")?;
        Ok(catalog.actions)
    }
}
