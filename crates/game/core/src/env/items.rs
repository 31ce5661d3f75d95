use arrayvec::ArrayVec;

use crate::action::ActionId;
use crate::config::CombatConfig;
use crate::state::Slot;
use crate::stats::{Attribute, AttributeSet};

/// Oracle providing item definitions.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: ItemId) -> Option<&ItemDefinition>;
}

/// Identifier of an item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat attribute bonus granted while an item is equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonus {
    pub attribute: Attribute,
    pub amount: i32,
}

/// Minimum effective attribute needed to equip an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipRequirement {
    pub attribute: Attribute,
    pub minimum: i32,
}

impl EquipRequirement {
    pub fn is_met_by(&self, attributes: &AttributeSet) -> bool {
        attributes.get(self.attribute) >= self.minimum
    }
}

/// Immutable item record.
///
/// Equipping clones the definition, so an equipped instance is never
/// affected by later catalog changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub slot: Slot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: ArrayVec<StatBonus, { CombatConfig::MAX_ITEM_BONUSES }>,
    /// Action fired by this item's slot key.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: Option<ActionId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: Option<EquipRequirement>,
    /// Seconds before the granted action can be used again; 0 means no cooldown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
}

impl ItemDefinition {
    pub fn new(id: u32, name: impl Into<String>, slot: Slot) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            slot,
            bonuses: ArrayVec::new(),
            action: None,
            requirement: None,
            cooldown: 0,
        }
    }

    /// Adds a bonus; extra bonuses beyond the capacity are ignored.
    pub fn with_bonus(mut self, attribute: Attribute, amount: i32) -> Self {
        let _ = self.bonuses.try_push(StatBonus { attribute, amount });
        self
    }

    pub fn with_action(mut self, action: ActionId) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_requirement(mut self, attribute: Attribute, minimum: i32) -> Self {
        self.requirement = Some(EquipRequirement { attribute, minimum });
        self
    }

    pub fn with_cooldown(mut self, seconds: u32) -> Self {
        self.cooldown = seconds;
        self
    }

    pub fn has_cooldown(&self) -> bool {
        self.cooldown > 0
    }
}
