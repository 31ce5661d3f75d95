//! Damage and mitigation math.

use crate::action::DamageSource;
use crate::config::CombatConfig;
use crate::stats::CombatStats;

/// Pre-crit damage of an attack.
///
/// # Formula
///
/// ```text
/// physical: base + damage_stat_scale × atk_pw
/// magic:    base + damage_stat_scale × mgc_pw
/// ```
pub fn base_damage(
    source: DamageSource,
    base: f64,
    attacker: &CombatStats,
    config: &CombatConfig,
) -> f64 {
    let power = match source {
        DamageSource::None => return 0.0,
        DamageSource::Physical => attacker.atk_pw,
        DamageSource::Magic => attacker.mgc_pw,
    };
    base + config.damage_stat_scale * f64::from(power)
}

/// Upper bound of the random mitigation roll for a defensive stat, if the
/// stat is high enough to roll at all.
///
/// The roll is uniform in `[0.01, stat / 100]` and only happens above 1.
pub fn roll_ceiling(stat: i32) -> Option<f64> {
    (stat > 1).then(|| f64::from(stat) / 100.0)
}

/// Fixed armor reduction: `armor / (armor + armor_constant)`.
pub fn armor_reduction(armor: i32, config: &CombatConfig) -> f64 {
    if armor <= 0 {
        return 0.0;
    }
    let armor = f64::from(armor);
    armor / (armor + config.armor_constant)
}

/// Clamps a mitigation fraction to `[0, mitigation_cap]`.
pub fn cap_mitigation(fraction: f64, config: &CombatConfig) -> f64 {
    fraction.clamp(0.0, config.mitigation_cap)
}

/// Rounded damage left after mitigation, never negative.
pub fn mitigated_damage(damage: f64, mitigation: f64) -> f64 {
    (damage * (1.0 - mitigation)).round().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(atk_pw: i32, mgc_pw: i32) -> CombatStats {
        CombatStats {
            atk_pw,
            mgc_pw,
            atk_sp: 1,
            ..CombatStats::default()
        }
    }

    #[test]
    fn base_damage_scales_from_matching_power() {
        let config = CombatConfig::default();
        let attacker = stats(50, 20);
        assert_eq!(base_damage(DamageSource::Physical, 10.0, &attacker, &config), 20.0);
        assert_eq!(base_damage(DamageSource::Magic, 10.0, &attacker, &config), 14.0);
        assert_eq!(base_damage(DamageSource::None, 10.0, &attacker, &config), 0.0);
    }

    #[test]
    fn low_defensive_stats_do_not_roll() {
        assert_eq!(roll_ceiling(0), None);
        assert_eq!(roll_ceiling(1), None);
        assert_eq!(roll_ceiling(40), Some(0.4));
    }

    #[test]
    fn armor_curve_and_cap() {
        let config = CombatConfig::default();
        assert_eq!(armor_reduction(0, &config), 0.0);
        assert_eq!(armor_reduction(200, &config), 0.5);
        assert_eq!(cap_mitigation(1.7, &config), 0.95);
        assert_eq!(cap_mitigation(-0.2, &config), 0.0);
    }

    #[test]
    fn mitigated_damage_rounds_and_floors() {
        assert_eq!(mitigated_damage(20.0, 0.0), 20.0);
        assert_eq!(mitigated_damage(10.0, 0.25), 8.0);
        assert_eq!(mitigated_damage(0.4, 0.0), 0.0);
    }
}
