//! In-memory repositories for tests and throwaway sessions.

mod leaderboard;
mod saves;

pub use leaderboard::InMemoryLeaderboard;
pub use saves::InMemorySaveRepo;
