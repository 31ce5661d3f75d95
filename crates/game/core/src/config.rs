use crate::action::ActionId;

/// Combat configuration constants and tunable parameters.
///
/// Capacities and fill-time bounds are compile-time constants because they
/// shape types (`ArrayVec` capacities) or invariants that must not drift.
/// Everything else is a balance knob that content may override through
/// `config.toml`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Seconds advanced per loop iteration when measured time is unusable.
    pub tick_seconds: f64,
    /// Fraction of attack/magic power added on top of an action's base value.
    pub damage_stat_scale: f64,
    /// Upper bound on total mitigation (block + armor or magic resist).
    pub mitigation_cap: f64,
    /// Armor reduction constant: `armor / (armor + armor_constant)`.
    pub armor_constant: f64,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f64,
    /// Dodge chance in percent is `dodge / dodge_divisor`.
    pub dodge_divisor: f64,
    /// Crit chance in percent is `crits / crit_divisor`.
    pub crit_divisor: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTIVE_EFFECTS: usize = 2;
    pub const MAX_LOG_ENTRIES: usize = 10;
    pub const MAX_ITEM_BONUSES: usize = 2;
    pub const MAX_STAT_DELTAS: usize = 2;
    pub const EQUIPMENT_SLOTS: usize = 8;
    pub const NPC_SEQUENCE_LEN: usize = 9;
    pub const NPC_LOOT_SLOTS: usize = 5;

    // ===== attack bar =====
    /// Fill time at 100 attack speed.
    pub const FASTEST_FILL_SECONDS: f64 = 1.2;
    /// Fill time at 0 attack speed.
    pub const SLOWEST_FILL_SECONDS: f64 = 5.0;
    /// Floor for any derived fill time; matches the default tick.
    pub const MIN_FILL_SECONDS: f64 = 0.1;
    pub const BAR_FULL: f64 = 100.0;

    // ===== default actions =====
    /// Action fired by the melee key.
    pub const DEFAULT_MELEE_ACTION: ActionId = ActionId(1);
    /// Action fired by the magic key.
    pub const DEFAULT_MAGIC_ACTION: ActionId = ActionId(2);

    // ===== progression =====
    /// Relative weights of the five loot entries on an NPC template.
    pub const LOOT_WEIGHTS: [u32; Self::NPC_LOOT_SLOTS] = [30, 30, 30, 8, 2];

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_SECONDS: f64 = 0.1;
    pub const DEFAULT_DAMAGE_STAT_SCALE: f64 = 0.2;
    pub const DEFAULT_MITIGATION_CAP: f64 = 0.95;
    pub const DEFAULT_ARMOR_CONSTANT: f64 = 200.0;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 2.0;
    pub const DEFAULT_DODGE_DIVISOR: f64 = 10.0;
    pub const DEFAULT_CRIT_DIVISOR: f64 = 3.0;

    pub fn new() -> Self {
        Self {
            tick_seconds: Self::DEFAULT_TICK_SECONDS,
            damage_stat_scale: Self::DEFAULT_DAMAGE_STAT_SCALE,
            mitigation_cap: Self::DEFAULT_MITIGATION_CAP,
            armor_constant: Self::DEFAULT_ARMOR_CONSTANT,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            dodge_divisor: Self::DEFAULT_DODGE_DIVISOR,
            crit_divisor: Self::DEFAULT_CRIT_DIVISOR,
        }
    }

    pub fn with_tick_seconds(tick_seconds: f64) -> Self {
        Self {
            tick_seconds,
            ..Self::new()
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
