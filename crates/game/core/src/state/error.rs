//! State mutation errors.

use crate::error::{ErrorSeverity, GameError};
use crate::stats::Attribute;

/// Errors raised when changing equipment.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{item} requires {attribute} >= {minimum} (have {actual})")]
    RequirementNotMet {
        item: String,
        attribute: Attribute,
        minimum: i32,
        actual: i32,
    },
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RequirementNotMet { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RequirementNotMet { .. } => "EQUIP_REQUIREMENT_NOT_MET",
        }
    }
}

