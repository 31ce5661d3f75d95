//! Creating and ticking timed effects.
//!
//! Both functions report what happened as log lines rather than errors: a
//! full stack is a "resisted" line, an action with nothing to apply is an
//! empty string.

use crate::action::{ActionDefinition, EffectTiming};
use crate::state::{ActiveEffect, EffectModifier, Entity, StatDelta, StatDeltas};
use crate::stats::{EffectTarget, Stat};

/// Ticked HP changes at or below this magnitude are applied silently.
const TICK_LOG_EPSILON: f64 = 0.01;

/// Modifier fields collected while reading an action's targets.
#[derive(Default)]
struct Pending {
    hp_per_second: f64,
    hp_on_end: f64,
    stats: StatDeltas,
    instant_hp: bool,
}

impl Pending {
    /// Later deltas on the same stat replace earlier ones.
    fn set_stat(&mut self, stat: Stat, amount: i32) {
        if let Some(existing) = self.stats.iter_mut().find(|d| d.stat == stat) {
            existing.amount = amount;
        } else {
            let _ = self.stats.try_push(StatDelta { stat, amount });
        }
    }

    fn into_modifier(self, timing: EffectTiming) -> EffectModifier {
        match timing {
            EffectTiming::Tick => EffectModifier::Tick {
                hp_per_second: self.hp_per_second,
                stats: self.stats,
            },
            EffectTiming::End => EffectModifier::End {
                hp_on_end: self.hp_on_end,
                stats: self.stats,
            },
            EffectTiming::Instant => EffectModifier::Instant { stats: self.stats },
        }
    }
}

/// HP per second for a tick effect; zero duration spends the whole amount
/// each second.
fn tick_rate(action: &ActionDefinition) -> f64 {
    if action.duration > 0.0 {
        action.base / action.duration
    } else {
        action.base
    }
}

/// Stat deltas are whole points; a fractional base rounds half away from zero.
fn stat_amount(action: &ActionDefinition) -> i32 {
    action.base.round() as i32
}

/// Applies the part of `action` that lands on `entity`.
///
/// With `source_is_self` the action's self-buff and self-debuff apply;
/// otherwise only its enemy debuff does. Instant HP changes land right away
/// and are clamped to headroom. Anything lasting is pushed onto the effect
/// stack, which then triggers a recompute.
pub fn apply_effect(entity: &mut Entity, action: &ActionDefinition, source_is_self: bool) -> String {
    let applies = if source_is_self {
        action.self_buff.is_some() || action.self_debuff.is_some()
    } else {
        action.debuff.is_some()
    };
    if !applies {
        return String::new();
    }

    if entity.effects.is_full() {
        return format!("{} resisted {} (max effects).", entity.name, action.name);
    }

    let mut pending = Pending::default();
    let mut message = String::new();
    let mut is_buff = false;

    if source_is_self {
        if let Some(target) = action.self_buff {
            is_buff = true;
            match target {
                EffectTarget::Hp => match action.timing {
                    EffectTiming::Tick => pending.hp_per_second = tick_rate(action),
                    EffectTiming::End => pending.hp_on_end = action.base,
                    EffectTiming::Instant => {
                        let healed = entity.restore_hp(action.base);
                        if healed > 0.0 {
                            message.push_str(&format!("{} heals {:.0} HP. ", entity.name, healed));
                            pending.instant_hp = true;
                        }
                    }
                },
                EffectTarget::Stat(stat) => {
                    pending.set_stat(stat, stat_amount(action));
                    message.push_str(&format!("{}'s {} increases. ", entity.name, stat));
                }
            }
        }

        if let Some(target) = action.self_debuff {
            is_buff = false;
            match target {
                EffectTarget::Hp => match action.timing {
                    EffectTiming::Tick => pending.hp_per_second = -tick_rate(action),
                    EffectTiming::End => pending.hp_on_end = -action.base,
                    EffectTiming::Instant => {
                        let lost = entity.drain_hp(action.base);
                        if lost > 0.0 {
                            message.push_str(&format!(
                                "{} takes {:.0} self-damage. ",
                                entity.name, lost
                            ));
                            pending.instant_hp = true;
                        }
                    }
                },
                EffectTarget::Stat(stat) => {
                    pending.set_stat(stat, -stat_amount(action));
                    message.push_str(&format!("{}'s {} decreases. ", entity.name, stat));
                }
            }
        }
    } else if let Some(target) = action.debuff {
        match target {
            // an instant enemy HP debuff has no effect of its own; damage
            // comes from the attack
            EffectTarget::Hp => match action.timing {
                EffectTiming::Tick => pending.hp_per_second = -tick_rate(action),
                EffectTiming::End => pending.hp_on_end = -action.base,
                EffectTiming::Instant => {}
            },
            EffectTarget::Stat(stat) => {
                pending.set_stat(stat, -stat_amount(action));
                message.push_str(&format!("{}'s {} decreases. ", entity.name, stat));
            }
        }
    }

    let instant_hp = pending.instant_hp;
    let modifier = pending.into_modifier(action.timing);
    if modifier.is_empty() {
        return message.trim_end().to_owned();
    }

    let effect = ActiveEffect {
        name: action.name.clone(),
        source: action.id,
        remaining: action.duration,
        is_buff,
        modifier,
    };
    if entity.effects.push(effect).is_err() {
        return format!("{} resisted {} (max effects).", entity.name, action.name);
    }
    entity.recompute();

    if instant_hp {
        message.trim_end().to_owned()
    } else {
        format!("{message}{} effect applied to {}.", action.name, entity.name)
    }
}

/// Advances every active effect on `entity` by `dt` seconds.
///
/// Walks the stack newest first so expired effects can be removed in place.
/// Expired effects release any on-end HP change before they are dropped.
pub fn tick_effects(entity: &mut Entity, dt: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut removed = false;

    for index in (0..entity.effects.len()).rev() {
        let Some(effect) = entity.effects.get_mut(index) else {
            continue;
        };
        effect.remaining -= dt;
        let expired = effect.remaining <= 0.0;
        let rate = effect.modifier.hp_per_second();
        let on_end = effect.modifier.hp_on_end();
        let name = effect.name.clone();

        if rate > 0.0 {
            let healed = entity.restore_hp(rate * dt);
            if healed > TICK_LOG_EPSILON {
                lines.push(format!("{} heals {:.1} HP from {}.", entity.name, healed, name));
            }
        } else if rate < 0.0 {
            let lost = entity.drain_hp(-rate * dt);
            entity.damage_taken += lost;
            if lost > TICK_LOG_EPSILON {
                lines.push(format!("{} takes {:.1} damage from {}.", entity.name, lost, name));
            }
        }

        if !expired {
            continue;
        }

        if on_end > 0.0 {
            let healed = entity.restore_hp(on_end);
            if healed > 0.0 {
                lines.push(format!("{} heals {:.0} HP as {} ends.", entity.name, healed, name));
            }
        } else if on_end < 0.0 {
            let lost = entity.drain_hp(-on_end);
            entity.damage_taken += lost;
            if lost > 0.0 {
                lines.push(format!("{} takes {:.0} damage as {} ends.", entity.name, lost, name));
            }
        }

        lines.push(format!("{} wore off from {}.", name, entity.name));
        entity.effects.remove(index);
        removed = true;
    }

    if removed {
        entity.recompute();
    }
    lines
}
