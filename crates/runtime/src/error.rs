//! Runtime error types.

use arena_core::OracleError;
use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors surfaced while driving or concluding a fight.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("HUD rendering failed: {0}")]
    Hud(#[from] std::io::Error),

    #[error("combat ended without an outcome")]
    NoOutcome,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
