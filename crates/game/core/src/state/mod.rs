//! Mutable combat state.
//!
//! Everything here belongs to one combatant: worn items, running effects
//! and item cooldowns, tied together by [`Entity`]. Combat resolution in
//! [`crate::combat`] and the loop in [`crate::engine`] mutate these types
//! directly.
pub mod cooldowns;
pub mod effects;
pub mod entity;
pub mod equipment;
pub mod error;

pub use cooldowns::Cooldowns;
pub use effects::{ActiveEffect, EffectModifier, EffectStack, StatDelta, StatDeltas};
pub use entity::{Entity, Role};
pub use equipment::{Equipment, Slot};
pub use error::EquipError;
