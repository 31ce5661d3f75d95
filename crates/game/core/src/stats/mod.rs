//! Layered stat system.
//!
//! ```text
//! base attributes ──► + equipment bonuses ──► + effect deltas ──► clamp (≥ 1)
//!                                                                   │
//!                               derived combat stats ◄──────────────┘
//!                                       │
//!                               attack-bar fill time
//! ```
//!
//! Each layer is a pure function of the one before. The entity-level
//! recompute that strings them together lives on
//! [`Entity::recompute`](crate::state::Entity::recompute).

pub mod attributes;
pub mod derived;
pub mod speed;
pub mod target;

pub use attributes::{Attribute, AttributeSet};
pub use derived::{CombatStats, DerivedStat};
pub use speed::{bar_gain, fill_seconds};
pub use target::{EffectTarget, Stat, UnknownStat};
