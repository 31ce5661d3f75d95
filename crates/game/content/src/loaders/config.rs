//! Combat configuration loader.

use std::path::Path;

use arena_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat balance settings from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing CombatConfig
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML text; omitted keys keep their defaults.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tick_seconds <= 0.0 {
            anyhow::bail!("tick_seconds must be positive, got {}", config.tick_seconds);
        }
        if !(0.0..=1.0).contains(&config.mitigation_cap) {
            anyhow::bail!(
                "mitigation_cap must lie in [0, 1], got {}",
                config.mitigation_cap
            );
        }

        Ok(config)
    }
}
