//! Combatant templates.
//!
//! Templates are the typed form of the character and NPC records a session
//! starts from. Every field has a default so sparse data files still load.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::action::ActionId;
use crate::config::CombatConfig;
use crate::env::ItemId;
use crate::state::Slot;
use crate::stats::AttributeSet;

/// Identifier of an NPC template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NpcId(pub u32);

/// Playable character, either a shipped default or a saved one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterTemplate {
    pub name: String,
    pub attributes: AttributeSet,
    /// Item id per slot. Ids the item catalog does not know are skipped.
    pub equipment: BTreeMap<Slot, ItemId>,
    pub level: u32,
    pub xp: u64,
    /// Present once the character has been saved.
    pub save_id: Option<u32>,
}

impl Default for CharacterTemplate {
    fn default() -> Self {
        Self {
            name: "Unnamed Character".to_owned(),
            attributes: AttributeSet::zeroed(),
            equipment: BTreeMap::new(),
            level: 1,
            xp: 0,
            save_id: None,
        }
    }
}

/// Opponent template: fixed stats and a repeating action sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcTemplate {
    pub id: NpcId,
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub atk_pw: i32,
    pub atk_sp: i32,
    pub mgc_pw: i32,
    pub block: i32,
    pub dodge: i32,
    pub armor: i32,
    pub mgc_rs: i32,
    pub crits: i32,
    /// Actions used in order, wrapping after the last entry. Empty entries
    /// leave the NPC confused for that turn.
    pub sequence: ArrayVec<Option<ActionId>, { CombatConfig::NPC_SEQUENCE_LEN }>,
    pub xp_yield: u32,
    /// Loot table; entry `i` drops with weight `CombatConfig::LOOT_WEIGHTS[i]`.
    pub loot: ArrayVec<Option<ItemId>, { CombatConfig::NPC_LOOT_SLOTS }>,
    pub text_start: Option<String>,
    pub text_death: Option<String>,
    pub text_win: Option<String>,
}

impl Default for NpcTemplate {
    fn default() -> Self {
        Self {
            id: NpcId::default(),
            name: "Unknown NPC".to_owned(),
            level: 1,
            hp: 100,
            atk_pw: 10,
            atk_sp: 20,
            mgc_pw: 10,
            block: 10,
            dodge: 10,
            armor: 10,
            mgc_rs: 10,
            crits: 10,
            sequence: ArrayVec::new(),
            xp_yield: 0,
            loot: ArrayVec::new(),
            text_start: None,
            text_death: None,
            text_win: None,
        }
    }
}

impl NpcTemplate {
    /// Sequence position for the `index`-th action taken this fight.
    pub const fn sequence_position(index: usize) -> usize {
        index % CombatConfig::NPC_SEQUENCE_LEN
    }

    /// Action at the given turn index, wrapping every nine turns.
    pub fn action_at(&self, index: usize) -> Option<ActionId> {
        self.sequence
            .get(Self::sequence_position(index))
            .copied()
            .flatten()
    }

    pub fn start_text(&self) -> String {
        self.text_start
            .clone()
            .unwrap_or_else(|| format!("{} appears!", self.name))
    }

    pub fn death_text(&self) -> String {
        self.text_death
            .clone()
            .unwrap_or_else(|| format!("{} is defeated.", self.name))
    }

    pub fn win_text(&self) -> String {
        self.text_win
            .clone()
            .unwrap_or_else(|| format!("{} is victorious!", self.name))
    }
}
