//! File-backed repositories.
//!
//! Saves are one JSON document rewritten through a temp file and rename.
//! The leaderboard is JSON lines, appended to and never rewritten.

mod leaderboard;
mod saves;

pub use leaderboard::FileLeaderboard;
pub use saves::FileSaveRepository;
