//! Runtime configuration and platform directories.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use arena_core::CombatConfig;

/// Settings the runtime needs beyond combat balance.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Content directory; `None` uses the data set compiled into `arena-content`.
    pub data_dir: Option<PathBuf>,
    /// Where saved characters and the leaderboard live.
    pub save_dir: PathBuf,
    /// Fixed session seed for reproducible fights.
    pub seed: Option<u64>,
    /// Target wall-clock length of one loop iteration.
    pub tick: Duration,
    pub session_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            save_dir: data_dir(),
            seed: None,
            tick: Duration::from_secs_f64(CombatConfig::DEFAULT_TICK_SECONDS),
            session_id: new_session_id(),
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: embedded data)
    /// - `ARENA_SAVE_DIR` - Save directory (default: platform-specific)
    /// - `ARENA_SEED` - Session seed (default: random)
    /// - `ARENA_TICK_MS` - Loop interval in milliseconds (default: 100)
    /// - `ARENA_SESSION_ID` - Session identifier for log files (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("ARENA_DATA_DIR").ok().map(PathBuf::from);

        if let Ok(dir) = env::var("ARENA_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }

        config.seed = read_env::<u64>("ARENA_SEED");

        if let Some(ms) = read_env::<u64>("ARENA_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }

        if let Ok(id) = env::var("ARENA_SESSION_ID") {
            config.session_id = id;
        }

        config
    }

    /// The configured seed, or a fresh random one.
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Tick length in seconds, as the combat loop expects it.
    pub fn tick_seconds(&self) -> f64 {
        self.tick.as_secs_f64()
    }
}

/// Get the platform-specific data directory for saves.
///
/// Falls back to `./save_data` when no home directory is known.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Get the platform-specific log directory.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/arena"))
        .join("logs")
}

fn new_session_id() -> String {
    format!("session_{}", chrono::Utc::now().timestamp())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
