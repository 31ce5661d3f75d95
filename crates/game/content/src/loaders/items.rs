//! Item catalog loader.

use std::path::Path;

use arena_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = parse_ron(content, "item catalog")?;
        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{ActionId, Attribute, Slot};

    #[test]
    fn parses_bonuses_requirement_and_cooldown() {
        let items = ItemLoader::parse(
            r#"(items: [
                (id: 4, name: "Charm", slot: Neck,
                 bonuses: [(attribute: BLS, amount: 2)],
                 action: Some(3), cooldown: 12,
                 requirement: Some((attribute: WIL, minimum: 5))),
            ])"#,
        )
        .unwrap();

        let charm = &items[0];
        assert_eq!(charm.slot, Slot::Neck);
        assert_eq!(charm.bonuses[0].attribute, Attribute::Bls);
        assert_eq!(charm.action, Some(ActionId(3)));
        assert!(charm.has_cooldown());
        assert_eq!(charm.requirement.map(|r| r.minimum), Some(5));
    }

    #[test]
    fn too_many_bonuses_fail_to_load() {
        let result = ItemLoader::parse(
            r#"(items: [(id: 1, name: "Crowded", slot: Head, bonuses: [
                (attribute: STA, amount: 1),
                (attribute: STR, amount: 1),
                (attribute: AGI, amount: 1),
            ])])"#,
        );
        assert!(result.is_err());
    }
}
