//! In-memory definition tables.
//!
//! [`Catalog`] is the concrete oracle the game runs on: content loaders fill
//! it once at startup and combat reads it through [`ActionOracle`] and
//! [`ItemOracle`].

use std::collections::BTreeMap;

use super::{ActionOracle, ItemDefinition, ItemId, ItemOracle};
use crate::action::{ActionDefinition, ActionId};

/// Action and item definitions keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    actions: BTreeMap<ActionId, ActionDefinition>,
    items: BTreeMap<ItemId, ItemDefinition>,
}

impl Catalog {
    pub fn new(
        actions: impl IntoIterator<Item = ActionDefinition>,
        items: impl IntoIterator<Item = ItemDefinition>,
    ) -> Self {
        Self {
            actions: actions.into_iter().map(|a| (a.id, a)).collect(),
            items: items.into_iter().map(|i| (i.id, i)).collect(),
        }
    }

    /// Inserts or replaces an action definition.
    pub fn insert_action(&mut self, action: ActionDefinition) {
        self.actions.insert(action.id, action);
    }

    /// Inserts or replaces an item definition.
    pub fn insert_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id, item);
    }

    pub fn actions(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl ActionOracle for Catalog {
    fn action(&self, id: ActionId) -> Option<&ActionDefinition> {
        self.actions.get(&id)
    }
}

impl ItemOracle for Catalog {
    fn item(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }
}
