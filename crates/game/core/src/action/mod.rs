//! Actions and the keys that select them.

mod definition;
mod key;

pub use definition::{ActionDefinition, ActionId, DamageSource, EffectTiming};
pub use key::{ActionKey, PlayerCommand};
