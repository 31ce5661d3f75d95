//! Attack-bar fill time.
//!
//! Attack speed maps linearly onto the time a combatant needs to fill its
//! attack bar from 0 to 100.

use crate::config::CombatConfig;

/// Seconds to fill the attack bar at the given attack speed.
///
/// ```text
/// fill = 1.2 + (5.0 - 1.2) · (1 - atk_sp / 100)
/// ```
///
/// Speeds above 100 keep shortening the fill, but never below
/// [`CombatConfig::MIN_FILL_SECONDS`].
pub fn fill_seconds(atk_sp: i32) -> f64 {
    let fastest = CombatConfig::FASTEST_FILL_SECONDS;
    let slowest = CombatConfig::SLOWEST_FILL_SECONDS;
    let fill = fastest + (slowest - fastest) * (1.0 - f64::from(atk_sp) / 100.0);
    fill.max(CombatConfig::MIN_FILL_SECONDS)
}

/// Bar progress gained over `dt` seconds.
#[inline]
pub fn bar_gain(fill_seconds: f64, dt: f64) -> f64 {
    CombatConfig::BAR_FULL / fill_seconds * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn endpoints() {
        assert!(approx(fill_seconds(0), 5.0));
        assert!(approx(fill_seconds(100), 1.2));
        assert!(approx(fill_seconds(50), 3.1));
    }

    #[test]
    fn floor_applies_to_extreme_speed() {
        // 1.2 - 3.8 · 2 is negative
        assert!(approx(fill_seconds(300), CombatConfig::MIN_FILL_SECONDS));
    }

    #[test]
    fn gain_fills_bar_in_fill_time() {
        let fill = fill_seconds(20);
        let gained = bar_gain(fill, fill);
        assert!(approx(gained, 100.0));
    }
}
