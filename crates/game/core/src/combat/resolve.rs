//! Attack resolution.
//!
//! Steps run in a fixed order:
//!
//! 1. self effect on the attacker
//! 2. dodge roll (skipped for pure self actions)
//! 3. damage: base, crit, mitigation
//! 4. enemy debuff on the target
//! 5. item cooldown for the slot the player fired
//!
//! A dodge ends resolution at step 2. Reordering any of these changes
//! outcomes.

use crate::action::{ActionDefinition, ActionId, DamageSource};
use crate::config::CombatConfig;
use crate::env::{ActionOracle, GameEnv, OracleError, RngOracle, RollContext, compute_seed};
use crate::state::Entity;

use super::damage::{armor_reduction, base_damage, cap_mitigation, mitigated_damage, roll_ceiling};
use super::effects::apply_effect;
use super::hit::{check_chance, crit_chance, dodge_chance};
use super::result::{AttackOutcome, AttackReport, DamageRoll};

/// Everything a resolution reads besides the two combatants.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub env: GameEnv<'a>,
    pub config: &'a CombatConfig,
    pub session_seed: u64,
    /// Resolution counter; distinct per bar fill within a combat.
    pub nonce: u64,
}

impl ResolveContext<'_> {
    fn seed(&self, actor: u32, context: RollContext) -> u64 {
        compute_seed(self.session_seed, self.nonce, actor, context)
    }
}

/// Resolves `action_id` from `attacker` against `target`.
///
/// Unknown actions are reported as a log line and change nothing.
///
/// # Errors
///
/// Returns `OracleError` if the context lacks an action table or an RNG.
pub fn resolve(
    attacker: &mut Entity,
    target: &mut Entity,
    action_id: ActionId,
    ctx: &ResolveContext<'_>,
) -> Result<AttackReport, OracleError> {
    let actions = ctx.env.actions()?;
    let rng = ctx.env.rng()?;

    let Some(action) = actions.action(action_id) else {
        let mut report = AttackReport::new(AttackOutcome::UnknownAction);
        report.push(format!(
            "{} tries to use unknown action ID {}!",
            attacker.name, action_id
        ));
        return Ok(report);
    };

    let actor = if attacker.is_player() { 0 } else { 1 };
    let mut report = AttackReport::new(AttackOutcome::SelfOnly);
    report.push(apply_effect(attacker, action, true));

    if action.touches_target() {
        let chance = dodge_chance(target.stats.dodge, ctx.config);
        if check_chance(chance, rng.roll_percent(ctx.seed(actor, RollContext::Dodge))) {
            report.outcome = AttackOutcome::Dodged;
            report.push(uses_line(attacker, action, target));
            report.push(format!("{} dodges {}!", target.name, action.name));
            return Ok(report);
        }

        let roll = if action.damage == DamageSource::None {
            report.push(uses_line(attacker, action, target));
            None
        } else {
            Some(strike(attacker, target, action, rng, actor, ctx, &mut report))
        };
        report.outcome = AttackOutcome::Landed(roll);
        report.push(apply_effect(target, action, false));
    }

    start_item_cooldown(attacker, action_id, &mut report);
    Ok(report)
}

fn uses_line(attacker: &Entity, action: &ActionDefinition, target: &Entity) -> String {
    format!("{} uses {} on {}!", attacker.name, action.name, target.name)
}

fn strike(
    attacker: &mut Entity,
    target: &mut Entity,
    action: &ActionDefinition,
    rng: &(dyn RngOracle + '_),
    actor: u32,
    ctx: &ResolveContext<'_>,
    report: &mut AttackReport,
) -> DamageRoll {
    let config = ctx.config;
    let base = base_damage(action.damage, action.base, &attacker.stats, config);

    let critical = base > 0.0
        && check_chance(
            crit_chance(attacker.stats.crits, config),
            rng.roll_percent(ctx.seed(actor, RollContext::Crit)),
        );
    let raw = if critical {
        base * config.crit_multiplier
    } else {
        base
    };

    let mitigation = if raw > 0.0 {
        let fraction = match action.damage {
            DamageSource::Magic => roll_ceiling(target.stats.mgc_rs).map_or(0.0, |high| {
                rng.uniform(ctx.seed(actor, RollContext::MagicResist), 0.01, high)
            }),
            _ => {
                let block = roll_ceiling(target.stats.block).map_or(0.0, |high| {
                    rng.uniform(ctx.seed(actor, RollContext::Block), 0.01, high)
                });
                block + armor_reduction(target.stats.armor, config)
            }
        };
        cap_mitigation(fraction, config)
    } else {
        0.0
    };

    let damage = mitigated_damage(raw, mitigation);
    let crit_tag = if critical { " (Critical Hit!)" } else { "" };

    let dealt = if damage > 0.0 {
        let dealt = target.drain_hp(damage);
        attacker.damage_dealt += dealt;
        target.damage_taken += dealt;
        report.push(format!(
            "{}{} ({}/{:.1}%/{:.0})",
            uses_line(attacker, action, target),
            crit_tag,
            raw.round() as i64,
            mitigation * 100.0,
            dealt
        ));
        dealt
    } else {
        report.push(format!(
            "{}{} but deals no damage.",
            uses_line(attacker, action, target),
            crit_tag
        ));
        0.0
    };

    DamageRoll {
        critical,
        raw,
        mitigation,
        dealt,
    }
}

/// Puts the fired slot's item on cooldown if it granted this action.
fn start_item_cooldown(attacker: &mut Entity, action_id: ActionId, report: &mut AttackReport) {
    let Some(slot) = attacker.queued_key().and_then(|key| key.slot()) else {
        return;
    };
    let Some(item) = attacker.equipment.get(slot) else {
        return;
    };
    if item.action != Some(action_id) || !item.has_cooldown() {
        return;
    }

    let (id, seconds) = (item.id, item.cooldown);
    report.push(format!("{} is now on cooldown ({}s).", item.name, seconds));
    attacker.cooldowns.set(id, f64::from(seconds));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKey, EffectTiming};
    use crate::env::{Catalog, CharacterTemplate, ItemDefinition, ItemId, NpcTemplate};
    use crate::state::Slot;
    use crate::stats::{AttributeSet, DerivedStat, EffectTarget, Stat};

    /// Always returns the same value, so every roll is predictable.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    const LOW: Fixed = Fixed(0);
    const HIGH: Fixed = Fixed(u32::MAX);

    fn catalog() -> Catalog {
        Catalog::new(
            [
                ActionDefinition::attack(10, "Smash", DamageSource::Physical, 10.0),
                ActionDefinition::attack(11, "Bolt", DamageSource::Magic, 10.0),
                ActionDefinition::attack(12, "Mend", DamageSource::None, 20.0)
                    .with_self_buff(EffectTarget::Hp),
                ActionDefinition::attack(13, "Hamstring", DamageSource::Physical, 4.0)
                    .with_debuff(EffectTarget::Stat(Stat::Derived(DerivedStat::AtkSp)))
                    .with_effect(5.0, EffectTiming::Instant),
                ActionDefinition::attack(14, "Hex", DamageSource::None, 3.0)
                    .with_debuff(EffectTarget::Stat(Stat::Derived(DerivedStat::Armor)))
                    .with_effect(5.0, EffectTiming::Instant),
            ],
            [ItemDefinition::new(50, "Amulet", Slot::Neck)
                .with_action(ActionId(12))
                .with_cooldown(8)],
        )
    }

    fn npc(name: &str, tweak: impl FnOnce(&mut NpcTemplate)) -> Entity {
        let mut template = NpcTemplate {
            name: name.to_owned(),
            atk_pw: 50,
            crits: 0,
            block: 0,
            armor: 0,
            dodge: 0,
            mgc_rs: 0,
            ..NpcTemplate::default()
        };
        tweak(&mut template);
        Entity::opponent(&template)
    }

    fn run(
        attacker: &mut Entity,
        target: &mut Entity,
        action: u32,
        catalog: &Catalog,
        rng: &dyn RngOracle,
    ) -> AttackReport {
        let config = CombatConfig::default();
        let ctx = ResolveContext {
            env: GameEnv::from_catalog(catalog, rng),
            config: &config,
            session_seed: 7,
            nonce: 1,
        };
        resolve(attacker, target, ActionId(action), &ctx).unwrap()
    }

    #[test]
    fn unmitigated_physical_hit_deals_exact_damage() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut brute, &mut dummy, 10, &catalog, &HIGH);

        assert_eq!(dummy.hp, 80.0);
        assert_eq!(brute.damage_dealt, 20.0);
        assert_eq!(dummy.damage_taken, 20.0);
        assert_eq!(report.damage_dealt(), 20.0);
        assert_eq!(report.lines, vec!["Brute uses Smash on Dummy! (20/0.0%/20)".to_owned()]);
    }

    #[test]
    fn zero_dodge_target_is_never_dodged() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut brute, &mut dummy, 10, &catalog, &LOW);

        assert_ne!(report.outcome, AttackOutcome::Dodged);
    }

    #[test]
    fn dodge_blocks_damage_and_debuff() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dancer = npc("Dancer", |t| t.dodge = 1000);

        let report = run(&mut brute, &mut dancer, 13, &catalog, &LOW);

        assert_eq!(report.outcome, AttackOutcome::Dodged);
        assert_eq!(dancer.hp, 100.0);
        assert!(dancer.effects.is_empty());
        assert_eq!(
            report.lines,
            vec![
                "Brute uses Hamstring on Dancer!".to_owned(),
                "Dancer dodges Hamstring!".to_owned(),
            ]
        );
    }

    #[test]
    fn crit_doubles_damage() {
        let catalog = catalog();
        let mut brute = npc("Brute", |t| t.crits = 30);
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut brute, &mut dummy, 10, &catalog, &LOW);

        match report.outcome {
            AttackOutcome::Landed(Some(roll)) => {
                assert!(roll.critical);
                assert_eq!(roll.dealt, 40.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(report.lines[0].contains("(Critical Hit!)"));
    }

    #[test]
    fn mitigation_is_capped() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut wall = npc("Wall", |t| {
            t.block = 100;
            t.armor = 100_000;
        });

        let report = run(&mut brute, &mut wall, 10, &catalog, &HIGH);

        match report.outcome {
            AttackOutcome::Landed(Some(roll)) => {
                assert!((roll.mitigation - 0.95).abs() < 1e-9);
                assert_eq!(roll.dealt, 1.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn magic_ignores_armor() {
        let catalog = catalog();
        let mut mage = npc("Mage", |t| t.mgc_pw = 50);
        let mut knight = npc("Knight", |t| t.armor = 200);

        run(&mut mage, &mut knight, 11, &catalog, &HIGH);

        assert_eq!(knight.hp, 80.0);
    }

    #[test]
    fn damage_never_exceeds_remaining_hp() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});
        dummy.hp = 5.0;

        let report = run(&mut brute, &mut dummy, 10, &catalog, &HIGH);

        assert_eq!(dummy.hp, 0.0);
        assert_eq!(report.damage_dealt(), 5.0);
        assert_eq!(brute.damage_dealt, 5.0);
    }

    #[test]
    fn debuff_lands_after_damage() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut brute, &mut dummy, 13, &catalog, &HIGH);

        assert_eq!(dummy.effects.len(), 1);
        assert_eq!(report.lines.len(), 2);
        assert!(report.lines[1].ends_with("Hamstring effect applied to Dummy."));
        assert_eq!(dummy.stats.atk_sp, 16);
    }

    #[test]
    fn debuff_only_action_logs_plain_use() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut brute, &mut dummy, 14, &catalog, &HIGH);

        assert_eq!(report.outcome, AttackOutcome::Landed(None));
        assert_eq!(report.lines[0], "Brute uses Hex on Dummy!");
        assert_eq!(dummy.hp, 100.0);
    }

    #[test]
    fn unknown_action_is_a_logged_noop() {
        let catalog = catalog();
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut brute, &mut dummy, 999, &catalog, &HIGH);

        assert_eq!(report.outcome, AttackOutcome::UnknownAction);
        assert_eq!(report.lines, vec!["Brute tries to use unknown action ID 999!".to_owned()]);
        assert_eq!(dummy.hp, 100.0);
    }

    #[test]
    fn item_action_starts_cooldown() {
        let catalog = catalog();
        let mut template = CharacterTemplate {
            name: "Hero".to_owned(),
            attributes: AttributeSet::zeroed(),
            ..CharacterTemplate::default()
        };
        template.equipment.insert(Slot::Neck, ItemId(50));
        let mut hero = Entity::player(&template, &catalog);
        hero.hp = 10.0;
        hero.queue(ActionKey::Neck);
        let mut dummy = npc("Dummy", |_| {});

        let report = run(&mut hero, &mut dummy, 12, &catalog, &HIGH);

        assert_eq!(report.outcome, AttackOutcome::SelfOnly);
        assert_eq!(hero.hp, 30.0);
        assert_eq!(hero.cooldowns.remaining(ItemId(50)), 8.0);
        assert_eq!(
            report.lines,
            vec![
                "Hero heals 20 HP.".to_owned(),
                "Amulet is now on cooldown (8s).".to_owned(),
            ]
        );
        assert_eq!(hero.action_for_key(ActionKey::Neck), None);
    }

    #[test]
    fn missing_rng_is_an_error() {
        let catalog = catalog();
        let config = CombatConfig::default();
        let actions: &dyn ActionOracle = &catalog;
        let ctx = ResolveContext {
            env: GameEnv::new(Some(actions), None, None),
            config: &config,
            session_seed: 0,
            nonce: 0,
        };
        let mut brute = npc("Brute", |_| {});
        let mut dummy = npc("Dummy", |_| {});

        let err = resolve(&mut brute, &mut dummy, ActionId(10), &ctx).unwrap_err();
        assert_eq!(err, OracleError::RngNotAvailable);
    }
}
