//! Action definitions.
//!
//! Actions are immutable records shared by every combatant through the
//! [`ActionOracle`](crate::env::ActionOracle). They say how much damage an
//! attack does, which stat it scales from, and which timed effect it leaves
//! on the user or on the target.

use crate::stats::EffectTarget;

/// Identifier of an action definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub u32);

impl core::fmt::Display for ActionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which power stat an attack scales from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    /// Utility action: no damage roll.
    #[default]
    None,
    /// Scales from AtkPw, mitigated by block and armor.
    Physical,
    /// Scales from MgcPw, mitigated by magic resist.
    Magic,
}

/// When an action's effect touches HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTiming {
    /// HP changes land immediately; only stat deltas are stored.
    #[default]
    Instant,
    /// HP changes are spread over the duration at a per-second rate.
    Tick,
    /// HP changes land once, when the effect expires.
    End,
}

/// Immutable action record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: DamageSource,
    /// Base damage for attacks; magnitude of the effect for buffs/debuffs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base: f64,
    /// Effect the user applies to itself as a buff.
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_buff: Option<EffectTarget>,
    /// Effect the user applies to itself as a cost.
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_debuff: Option<EffectTarget>,
    /// Effect applied to the target if the action is not dodged.
    #[cfg_attr(feature = "serde", serde(default))]
    pub debuff: Option<EffectTarget>,
    /// Effect duration in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: EffectTiming,
}

impl ActionDefinition {
    /// Plain attack with no effects.
    pub fn attack(id: u32, name: impl Into<String>, damage: DamageSource, base: f64) -> Self {
        Self {
            id: ActionId(id),
            name: name.into(),
            damage,
            base,
            self_buff: None,
            self_debuff: None,
            debuff: None,
            duration: 0.0,
            timing: EffectTiming::Instant,
        }
    }

    pub fn with_self_buff(mut self, target: EffectTarget) -> Self {
        self.self_buff = Some(target);
        self
    }

    pub fn with_self_debuff(mut self, target: EffectTarget) -> Self {
        self.self_debuff = Some(target);
        self
    }

    pub fn with_debuff(mut self, target: EffectTarget) -> Self {
        self.debuff = Some(target);
        self
    }

    pub fn with_effect(mut self, duration: f64, timing: EffectTiming) -> Self {
        self.duration = duration;
        self.timing = timing;
        self
    }

    /// True when resolving this action involves the target at all.
    pub fn touches_target(&self) -> bool {
        self.damage != DamageSource::None || self.debuff.is_some()
    }
}
