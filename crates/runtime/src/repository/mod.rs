//! Persistence for saved characters and the leaderboard.
//!
//! Both concerns have a trait, a file-backed implementation used by the
//! client, and an in-memory one for tests.
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileLeaderboard, FileSaveRepository};
pub use memory::{InMemoryLeaderboard, InMemorySaveRepo};
pub use traits::{LeaderboardRepository, SaveRepository};
pub use types::LeaderboardEntry;
