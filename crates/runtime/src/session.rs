//! Post-fight bookkeeping: rewards, saves and the leaderboard.
//!
//! Persistence failures never abort a session. They are reported as log
//! lines and `warn` events and the session carries on.

use arena_core::{
    CombatOutcome, Entity, ItemDefinition, ItemOracle, PcgRng, RollContext,
    award_experience, compute_seed, roll_loot,
};
use tracing::{info, warn};

use crate::repository::{LeaderboardEntry, LeaderboardRepository, SaveRepository};

/// Asks the player whether to wear a dropped item.
pub trait LootPrompt {
    /// `current` is whatever occupies the item's slot now.
    fn offer(&mut self, offered: &ItemDefinition, current: Option<&ItemDefinition>) -> bool;
}

/// Accepts every drop. Useful for unattended runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysEquip;

impl LootPrompt for AlwaysEquip {
    fn offer(&mut self, _offered: &ItemDefinition, _current: Option<&ItemDefinition>) -> bool {
        true
    }
}

/// One play session: a seed, the repositories, and a fight counter.
pub struct Session {
    saves: Box<dyn SaveRepository>,
    leaderboard: Box<dyn LeaderboardRepository>,
    rng: PcgRng,
    seed: u64,
    fights: u64,
}

impl Session {
    pub fn new(
        saves: Box<dyn SaveRepository>,
        leaderboard: Box<dyn LeaderboardRepository>,
        seed: u64,
    ) -> Self {
        info!(seed, "session started");
        Self {
            saves,
            leaderboard,
            rng: PcgRng,
            seed,
            fights: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&self) -> &PcgRng {
        &self.rng
    }

    pub fn saves(&self) -> &dyn SaveRepository {
        self.saves.as_ref()
    }

    pub fn leaderboard(&self) -> &dyn LeaderboardRepository {
        self.leaderboard.as_ref()
    }

    /// Seed for the next fight. Each fight in a session rolls differently
    /// while the whole session still replays from its seed.
    pub fn next_fight_seed(&mut self) -> u64 {
        self.fights += 1;
        self.seed ^ self.fights.wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }

    /// Settles a finished fight.
    ///
    /// On a win the player gains XP, may pick up loot through `prompt`, and
    /// is saved. Every fight is recorded to the leaderboard. A saved
    /// character that loses, by knockout or forfeit, is deleted. Returns the
    /// lines to show the player.
    pub fn conclude<I>(
        &mut self,
        outcome: &CombatOutcome,
        fight_seed: u64,
        player: &mut Entity,
        opponent: &Entity,
        items: &I,
        prompt: &mut dyn LootPrompt,
    ) -> Vec<String>
    where
        I: ItemOracle + ?Sized,
    {
        let mut lines = Vec::new();

        if outcome.player_won() {
            self.reward(fight_seed, player, opponent, items, prompt, &mut lines);
            self.save(player, &mut lines);
        }

        let entry = LeaderboardEntry::new(player, opponent, outcome);
        match self.leaderboard.record(&entry) {
            Ok(()) => lines.push(format!("{} recorded to leaderboard.", player.name)),
            Err(e) => {
                warn!(error = %e, "leaderboard write failed");
                lines.push(format!("Error recording to leaderboard: {e}"));
            }
        }

        if !outcome.player_won()
            && let Some(save_id) = player.save_id
        {
            match self.saves.delete(save_id) {
                Ok(()) => {
                    lines.push(format!(
                        "Player {} (SaveID: {}) removed from saves after loss.",
                        player.name, save_id
                    ));
                    player.save_id = None;
                }
                Err(e) => {
                    warn!(error = %e, save_id, "save delete failed");
                    lines.push(format!("Error removing player {} from saves: {e}", player.name));
                }
            }
        }

        lines
    }

    fn reward<I>(
        &self,
        fight_seed: u64,
        player: &mut Entity,
        opponent: &Entity,
        items: &I,
        prompt: &mut dyn LootPrompt,
        lines: &mut Vec<String>,
    ) where
        I: ItemOracle + ?Sized,
    {
        let Some(npc) = opponent.npc_template() else {
            warn!(opponent = %opponent.name, "opponent has no template, skipping rewards");
            return;
        };

        lines.push(format!("{} defeated {}!", player.name, npc.name));
        let gained = award_experience(player, npc);
        lines.push(format!("Gained {} XP. Total XP: {}", gained, player.xp));

        let seed = compute_seed(fight_seed, 0, 0, RollContext::Loot);
        let Some(drop) = roll_loot(player, npc, items, &self.rng, seed) else {
            lines.push("No valid loot dropped.".to_owned());
            return;
        };

        let item = drop.item;
        lines.push(format!("{} dropped: {} (Slot: {})!", npc.name, item.name, item.slot));

        if !drop.equippable {
            if let Some(requirement) = item.requirement {
                lines.push(format!(
                    "You don't meet requirements for {} ({} ≥ {}). It is discarded.",
                    item.name, requirement.attribute, requirement.minimum
                ));
            }
            return;
        }

        let current_name = player
            .equipment
            .get(item.slot)
            .map_or_else(|| "Nothing".to_owned(), |current| current.name.clone());
        if prompt.offer(&item, player.equipment.get(item.slot)) {
            lines.push(format!("Equipped {}.", item.name));
            player.equip(item);
        } else {
            lines.push(format!("Kept {} instead of {}.", current_name, item.name));
        }
    }

    fn save(&self, player: &mut Entity, lines: &mut Vec<String>) {
        match self.saves.upsert(&player.to_template()) {
            Ok(id) => {
                player.save_id = Some(id);
                lines.push(format!("Character {} saved (ID: {}).", player.name, id));
            }
            Err(e) => {
                warn!(error = %e, "character save failed");
                lines.push(format!("Error saving character: {e}"));
            }
        }
    }
}
