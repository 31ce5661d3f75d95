//! Action definition oracle.

use crate::action::{ActionDefinition, ActionId};

/// Oracle providing action definitions.
///
/// Definitions are loaded from data files and shared read-only by every
/// combatant.
pub trait ActionOracle: Send + Sync {
    fn action(&self, id: ActionId) -> Option<&ActionDefinition>;
}
