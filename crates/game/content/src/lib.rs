//! Data-driven content definitions and loaders.
//!
//! This crate turns RON/TOML data files into the typed records `arena-core`
//! runs on:
//! - Action definitions (RON)
//! - Item catalog (RON)
//! - Default characters (RON)
//! - Opponent templates (RON)
//! - Combat balance configuration (TOML)
//!
//! A complete data set is compiled in and available through
//! [`ContentFactory::embedded`]; a data directory on disk overrides it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, CharacterLoader, ConfigLoader, ContentBundle, ContentFactory, ItemLoader,
    LoadResult, NpcLoader,
};
