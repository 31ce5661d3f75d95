//! Read-only views handed to the HUD each tick.

use crate::env::ActionOracle;
use crate::state::Entity;
use crate::stats::CombatStats;

use super::log::LogEntry;
use super::state::CombatState;

/// One active effect as displayed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectView {
    pub name: String,
    pub remaining: f64,
    pub is_buff: bool,
}

/// One combatant as displayed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub name: String,
    pub is_player: bool,
    pub hp: f64,
    pub max_hp: f64,
    pub bar: f64,
    pub stats: CombatStats,
    pub effects: Vec<EffectView>,
    /// Player: key label and what it fires. Opponent: next sequenced action.
    pub queued: String,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    /// Damage dealt per combat second.
    pub dps: f64,
}

impl CombatantView {
    pub(crate) fn of<A>(entity: &Entity, actions: Option<&A>, elapsed: f64) -> Self
    where
        A: ActionOracle + ?Sized,
    {
        let name_of = |id| {
            actions
                .and_then(|actions| actions.action(id))
                .map(|action| action.name.clone())
        };

        let queued = match (entity.queued_key(), entity.next_sequence_action()) {
            (Some(key), _) => {
                let fires = entity
                    .action_for_key(key)
                    .and_then(name_of)
                    .unwrap_or_else(|| "Invalid/CD".to_owned());
                format!("{} ({})", key.label(), fires)
            }
            (None, Some((position, id))) => {
                let next = id.and_then(name_of).unwrap_or_else(|| "???".to_owned());
                format!("act{position}: {next}")
            }
            (None, None) => String::new(),
        };

        Self {
            name: entity.name.clone(),
            is_player: entity.is_player(),
            hp: entity.hp,
            max_hp: entity.max_hp(),
            bar: entity.bar,
            stats: entity.stats,
            effects: entity
                .effects
                .iter()
                .map(|effect| EffectView {
                    name: effect.name.clone(),
                    remaining: effect.remaining.max(0.0),
                    is_buff: effect.is_buff,
                })
                .collect(),
            queued,
            damage_dealt: entity.damage_dealt,
            damage_taken: entity.damage_taken,
            dps: if elapsed > 0.0 {
                entity.damage_dealt / elapsed
            } else {
                0.0
            },
        }
    }
}

/// Everything the HUD shows for one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub state: CombatState,
    pub elapsed: f64,
    pub player: CombatantView,
    pub opponent: CombatantView,
    /// Oldest first, at most ten entries.
    pub log: Vec<LogEntry>,
}
