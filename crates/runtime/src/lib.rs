//! Runtime shell around the deterministic duel rules.
//!
//! `arena-core` knows nothing about clocks, files or terminals. This crate
//! supplies them:
//! - [`config`] reads settings from the environment
//! - [`driver`] runs a fight in real time against input and HUD traits
//! - [`repository`] persists saved characters and the leaderboard
//! - [`session`] settles each fight: rewards, saves, leaderboard rows
pub mod config;
pub mod driver;
pub mod error;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use driver::{CombatDriver, HudSink, InputSource};
pub use error::{Result, RuntimeError};
pub use repository::{
    FileLeaderboard, FileSaveRepository, InMemoryLeaderboard, InMemorySaveRepo, LeaderboardEntry,
    LeaderboardRepository, RepositoryError, SaveRepository,
};
pub use session::{AlwaysEquip, LootPrompt, Session};
