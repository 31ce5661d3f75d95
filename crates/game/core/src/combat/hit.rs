//! Dodge and crit chance.

use crate::config::CombatConfig;

/// Dodge chance in percent for a defender with the given dodge stat.
///
/// # Formula
///
/// ```text
/// dodge_chance = dodge / dodge_divisor
/// ```
pub fn dodge_chance(dodge: i32, config: &CombatConfig) -> f64 {
    f64::from(dodge.max(0)) / config.dodge_divisor
}

/// Crit chance in percent for an attacker with the given crit stat.
pub fn crit_chance(crits: i32, config: &CombatConfig) -> f64 {
    f64::from(crits.max(0)) / config.crit_divisor
}

/// Percent rolls in `[0, 100)` succeed when strictly below the chance.
pub fn check_chance(chance: f64, roll: f64) -> bool {
    roll < chance
}
