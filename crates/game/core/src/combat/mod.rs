//! Combat resolution.
//!
//! Pure functions over two [`Entity`](crate::state::Entity) values: effect
//! application and ticking, dodge/crit chances, damage and mitigation math,
//! and the attack resolver that strings them together. Randomness comes
//! only from the [`RngOracle`](crate::env::RngOracle) in the
//! [`ResolveContext`].

pub mod damage;
pub mod effects;
pub mod hit;
pub mod resolve;
pub mod result;

pub use damage::{armor_reduction, base_damage, cap_mitigation, mitigated_damage, roll_ceiling};
pub use effects::{apply_effect, tick_effects};
pub use hit::{check_chance, crit_chance, dodge_chance};
pub use resolve::{ResolveContext, resolve};
pub use result::{AttackOutcome, AttackReport, DamageRoll};
