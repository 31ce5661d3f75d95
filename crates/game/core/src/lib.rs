//! Deterministic duel rules shared by the runtime and the terminal client.
//!
//! `arena-core` defines the stat model, timed effects, item cooldowns, the
//! attack resolver and the real-time combat loop. It performs no I/O: the
//! caller feeds [`engine::Combat::step`] measured elapsed time and input,
//! and reads back snapshots and log lines. Definition tables and the random
//! source reach the rules through [`env::GameEnv`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod rewards;
pub mod state;
pub mod stats;

pub use action::{ActionDefinition, ActionId, ActionKey, DamageSource, EffectTiming, PlayerCommand};
pub use combat::{AttackOutcome, AttackReport, ResolveContext, apply_effect, resolve, tick_effects};
pub use config::CombatConfig;
pub use engine::{
    Combat, CombatLog, CombatOutcome, CombatSnapshot, CombatState, CombatantView, DamageTotals,
    EffectView, LogEntry, Side,
};
pub use env::{
    ActionOracle, Catalog, CharacterTemplate, Env, GameEnv, ItemDefinition, ItemId, ItemOracle,
    NpcId, NpcTemplate, OracleError, PcgRng, RngOracle, RollContext, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use rewards::{LootDrop, award_experience, roll_loot};
pub use state::{ActiveEffect, Cooldowns, EffectStack, Entity, EquipError, Equipment, Role, Slot};
pub use stats::{Attribute, AttributeSet, CombatStats, DerivedStat, EffectTarget, Stat};
