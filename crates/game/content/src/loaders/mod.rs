//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, balance settings are TOML. Each loader parses from a
//! string so the factory can feed it either a file on disk or the data set
//! compiled into the crate.

pub mod actions;
pub mod characters;
pub mod config;
pub mod factory;
pub mod items;
pub mod npcs;

pub use actions::ActionLoader;
pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use items::ItemLoader;
pub use npcs::NpcLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
