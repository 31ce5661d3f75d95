//! Arena terminal client.
//!
//! Composition root: reads configuration, installs logging, loads content,
//! opens the repositories and hands everything to [`app::App`].
//!
//! ```bash
//! # built-in content, random seed
//! cargo run -p arena-client
//!
//! # custom content and a reproducible session
//! ARENA_DATA_DIR=./data ARENA_SEED=42 cargo run -p arena-client
//! ```
mod app;
mod hud;
mod input;
mod logging;
mod menu;
mod terminal;

use anyhow::{Context, Result};
use arena_content::ContentFactory;
use arena_runtime::{FileLeaderboard, FileSaveRepository, RuntimeConfig, Session};

use crate::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _log_guard = logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting Arena client");
    tracing::info!("Save directory: {}", config.save_dir.display());

    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::embedded(),
    };
    let content = factory
        .load_all()
        .context("The game cannot continue without its essential data files")?;

    let session = Session::new(
        Box::new(FileSaveRepository::new(&config.save_dir)?),
        Box::new(FileLeaderboard::new(&config.save_dir)?),
        config.session_seed(),
    );

    let mut tui = terminal::init()?;
    let _guard = terminal::TerminalGuard;
    let result = App::new(&config, content, session).run(&mut tui).await;

    if let Err(e) = &result {
        tracing::error!("Client stopped with error: {:#}", e);
    }
    tracing::info!("Client shutdown complete");
    result
}
