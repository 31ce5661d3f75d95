//! NPC template loader.

use std::path::Path;

use arena_core::NpcTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// NPC catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcCatalog {
    pub npcs: Vec<NpcTemplate>,
}

/// Loader for opponent templates.
///
/// Sequences longer than nine entries or loot tables longer than five are
/// rejected rather than truncated.
pub struct NpcLoader;

impl NpcLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<NpcTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<NpcTemplate>> {
        let catalog: NpcCatalog = parse_ron(content, "NPC catalog")?;
        Ok(catalog.npcs)
    }
}
