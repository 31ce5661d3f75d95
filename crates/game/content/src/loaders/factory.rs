//! Content factory for building the definition catalog from data files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use arena_core::{
    ActionDefinition, ActionId, Catalog, CharacterTemplate, CombatConfig, ItemDefinition, NpcId,
    NpcTemplate,
};

use crate::loaders::{
    ActionLoader, CharacterLoader, ConfigLoader, ItemLoader, LoadResult, NpcLoader,
};

const EMBEDDED_ACTIONS: &str = include_str!("../../data/actions.ron");
const EMBEDDED_ITEMS: &str = include_str!("../../data/items.ron");
const EMBEDDED_CHARACTERS: &str = include_str!("../../data/characters.ron");
const EMBEDDED_NPCS: &str = include_str!("../../data/npcs.ron");
const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

#[derive(Debug, Clone)]
enum Source {
    Directory(PathBuf),
    Embedded,
}

/// Content factory that loads all game content from a data directory or
/// from the data set compiled into this crate.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── actions.ron
/// ├── items.ron
/// ├── characters.ron
/// └── npcs.ron
/// ```
#[derive(Debug, Clone)]
pub struct ContentFactory {
    source: Source,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(data_dir.into()),
        }
    }

    /// Creates a factory over the built-in data set.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Returns the data directory path, if loading from disk.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Directory(dir) => Some(dir),
            Source::Embedded => None,
        }
    }

    /// Load combat configuration from `config.toml`.
    ///
    /// A data directory without `config.toml` yields the default config.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        match &self.source {
            Source::Directory(dir) => {
                let path = dir.join("config.toml");
                if path.exists() {
                    ConfigLoader::load(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config.toml, using defaults");
                    Ok(CombatConfig::default())
                }
            }
            Source::Embedded => ConfigLoader::parse(EMBEDDED_CONFIG),
        }
    }

    /// Load action definitions from `actions.ron`.
    pub fn load_actions(&self) -> LoadResult<Vec<ActionDefinition>> {
        match &self.source {
            Source::Directory(dir) => ActionLoader::load(&dir.join("actions.ron")),
            Source::Embedded => ActionLoader::parse(EMBEDDED_ACTIONS),
        }
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        match &self.source {
            Source::Directory(dir) => ItemLoader::load(&dir.join("items.ron")),
            Source::Embedded => ItemLoader::parse(EMBEDDED_ITEMS),
        }
    }

    /// Load default characters from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<CharacterTemplate>> {
        match &self.source {
            Source::Directory(dir) => CharacterLoader::load(&dir.join("characters.ron")),
            Source::Embedded => CharacterLoader::parse(EMBEDDED_CHARACTERS),
        }
    }

    /// Load opponents from `npcs.ron`.
    pub fn load_npcs(&self) -> LoadResult<Vec<NpcTemplate>> {
        match &self.source {
            Source::Directory(dir) => NpcLoader::load(&dir.join("npcs.ron")),
            Source::Embedded => NpcLoader::parse(EMBEDDED_NPCS),
        }
    }

    /// Loads every file and checks the result is playable.
    ///
    /// # Errors
    ///
    /// Fails if any file is unreadable or malformed, or if actions, items,
    /// characters or NPCs come back empty. Dangling references between
    /// files are only warned about; combat treats them as no-ops.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let config = self.load_config()?;
        let actions = self.load_actions()?;
        let items = self.load_items()?;
        let characters = self.load_characters()?;
        let npcs = self.load_npcs()?;

        let mut missing = Vec::new();
        if actions.is_empty() {
            missing.push("actions");
        }
        if items.is_empty() {
            missing.push("items");
        }
        if characters.is_empty() {
            missing.push("characters");
        }
        if npcs.is_empty() {
            missing.push("npcs");
        }
        if !missing.is_empty() {
            anyhow::bail!("essential content is empty: {}", missing.join(", "));
        }

        let bundle = ContentBundle {
            catalog: Catalog::new(actions, items),
            characters,
            npcs,
            config,
        };
        bundle.warn_dangling_references();

        tracing::info!(
            actions = bundle.catalog.action_count(),
            items = bundle.catalog.item_count(),
            characters = bundle.characters.len(),
            npcs = bundle.npcs.len(),
            "content loaded"
        );
        Ok(bundle)
    }
}

/// Everything a session needs from content, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub catalog: Catalog,
    pub characters: Vec<CharacterTemplate>,
    pub npcs: Vec<NpcTemplate>,
    pub config: CombatConfig,
}

impl ContentBundle {
    pub fn character(&self, name: &str) -> Option<&CharacterTemplate> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn npc(&self, id: NpcId) -> Option<&NpcTemplate> {
        self.npcs.iter().find(|n| n.id == id)
    }

    fn warn_dangling_references(&self) {
        let known: BTreeSet<ActionId> = self.catalog.actions().map(|a| a.id).collect();

        for id in [
            CombatConfig::DEFAULT_MELEE_ACTION,
            CombatConfig::DEFAULT_MAGIC_ACTION,
        ] {
            if !known.contains(&id) {
                tracing::warn!(action = %id, "default key action is not defined");
            }
        }

        for item in self.catalog.items() {
            if let Some(action) = item.action.filter(|a| !known.contains(a)) {
                tracing::warn!(item = %item.name, action = %action, "item grants unknown action");
            }
        }

        for npc in &self.npcs {
            for action in npc.sequence.iter().flatten().filter(|a| !known.contains(*a)) {
                tracing::warn!(npc = %npc.name, action = %action, "sequence uses unknown action");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Some(Path::new("/tmp/data")));
        assert_eq!(ContentFactory::embedded().data_dir(), None);
    }

    #[test]
    fn embedded_data_set_loads() {
        let bundle = ContentFactory::embedded().load_all().unwrap();

        assert!(bundle.catalog.action_count() >= 2);
        assert!(bundle.catalog.item_count() > 0);
        assert!(bundle.character("Aldric").is_some());
        assert!(bundle.npc(NpcId(1)).is_some());
        assert_eq!(bundle.config, CombatConfig::default());
    }
}
