//! Records written by the repositories.

use std::collections::BTreeMap;

use arena_core::{AttributeSet, CombatOutcome, Entity, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished fight, as shown on the leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub timestamp: DateTime<Utc>,
    pub character: String,
    pub opponent: String,
    /// Combat seconds, rounded to two decimals.
    pub duration: f64,
    pub level: u32,
    /// 1 when the character won, 0 otherwise.
    pub kills: u32,
    pub damage_done: f64,
    pub damage_received: f64,
    /// Worn item name per slot; `"None"` for empty slots.
    pub items: BTreeMap<Slot, String>,
    /// Effective attributes at the end of the fight.
    pub attributes: AttributeSet,
}

impl LeaderboardEntry {
    pub const EMPTY_SLOT: &'static str = "None";

    pub fn new(player: &Entity, opponent: &Entity, outcome: &CombatOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            character: player.name.clone(),
            opponent: opponent.name.clone(),
            duration: (outcome.duration * 100.0).round() / 100.0,
            level: player.level,
            kills: u32::from(outcome.player_won()),
            damage_done: outcome.player.dealt,
            damage_received: outcome.player.taken,
            items: player
                .equipment
                .iter()
                .map(|(slot, item)| {
                    let name = item.map_or(Self::EMPTY_SLOT, |item| item.name.as_str());
                    (slot, name.to_owned())
                })
                .collect(),
            attributes: player.attributes,
        }
    }
}
