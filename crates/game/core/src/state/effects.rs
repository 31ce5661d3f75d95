//! Active effects on a combatant.
//!
//! An effect is a timed modifier created by an action. Its HP behaviour is
//! tagged by timing so there is no way to store, say, an on-expiry heal on
//! an instant effect.
//!
//! # Capacity
//!
//! A combatant holds at most [`CombatConfig::MAX_ACTIVE_EFFECTS`] effects.
//! New effects beyond that are resisted, never queued.

use arrayvec::ArrayVec;

use crate::action::ActionId;
use crate::config::CombatConfig;
use crate::stats::Stat;

/// Signed shift of one stat while an effect is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    pub stat: Stat,
    pub amount: i32,
}

/// Stat deltas carried by one effect (self-buff and self-debuff at most).
pub type StatDeltas = ArrayVec<StatDelta, { CombatConfig::MAX_STAT_DELTAS }>;

/// Timing-tagged modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectModifier {
    /// HP changes continuously at `hp_per_second` while active.
    Tick {
        hp_per_second: f64,
        stats: StatDeltas,
    },
    /// HP changes once by `hp_on_end` when the effect expires.
    End { hp_on_end: f64, stats: StatDeltas },
    /// Stat deltas only; any HP change already happened at creation.
    Instant { stats: StatDeltas },
}

impl EffectModifier {
    pub fn stats(&self) -> &StatDeltas {
        match self {
            Self::Tick { stats, .. } | Self::End { stats, .. } | Self::Instant { stats } => stats,
        }
    }

    pub fn hp_per_second(&self) -> f64 {
        match self {
            Self::Tick { hp_per_second, .. } => *hp_per_second,
            _ => 0.0,
        }
    }

    pub fn hp_on_end(&self) -> f64 {
        match self {
            Self::End { hp_on_end, .. } => *hp_on_end,
            _ => 0.0,
        }
    }

    /// A modifier that changes nothing is never stored.
    pub fn is_empty(&self) -> bool {
        self.stats().is_empty() && self.hp_per_second() == 0.0 && self.hp_on_end() == 0.0
    }
}

/// One timed effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    /// Display name, taken from the originating action.
    pub name: String,
    pub source: ActionId,
    /// Seconds left; the effect expires once this reaches 0.
    pub remaining: f64,
    pub is_buff: bool,
    pub modifier: EffectModifier,
}

/// Bounded, insertion-ordered set of active effects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectStack {
    effects: ArrayVec<ActiveEffect, { CombatConfig::MAX_ACTIVE_EFFECTS }>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.effects.is_full()
    }

    /// Adds an effect, handing it back if the stack is full.
    pub fn push(&mut self, effect: ActiveEffect) -> Result<(), ActiveEffect> {
        self.effects.try_push(effect).map_err(|err| err.element())
    }

    pub fn get(&self, index: usize) -> Option<&ActiveEffect> {
        self.effects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ActiveEffect> {
        self.effects.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> ActiveEffect {
        self.effects.remove(index)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    /// Every stat delta across all active effects.
    pub fn stat_deltas(&self) -> impl Iterator<Item = &StatDelta> {
        self.effects.iter().flat_map(|e| e.modifier.stats().iter())
    }
}
