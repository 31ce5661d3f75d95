//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data at line {line}: {reason}")]
    CorruptedData { line: usize, reason: String },

    #[error("no saved character with id {0}")]
    UnknownSave(u32),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
