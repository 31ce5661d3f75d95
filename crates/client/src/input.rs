//! Keyboard input.
//!
//! Combat reads single characters without blocking; menus wait for a key
//! and map it to navigation.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use arena_core::PlayerCommand;
use arena_runtime::InputSource;

/// Navigation decoded from a key press while a menu is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Select,
    Back,
    /// Jump straight to the option with this 0-based index.
    Pick(usize),
    None,
}

/// Maps a menu key press. Digits pick options directly, 1-based.
pub fn menu_key(key: KeyEvent) -> MenuKey {
    if key.kind != KeyEventKind::Press {
        return MenuKey::None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => MenuKey::Up,
        KeyCode::Down | KeyCode::Char('j') => MenuKey::Down,
        KeyCode::Enter | KeyCode::Char(' ') => MenuKey::Select,
        KeyCode::Esc => MenuKey::Back,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => MenuKey::Back,
        KeyCode::Char(ch) => match ch.to_digit(10) {
            Some(digit) if digit > 0 => MenuKey::Pick(digit as usize - 1),
            _ => MenuKey::None,
        },
        _ => MenuKey::None,
    }
}

/// Maps a combat key press to the character the combat loop acts on.
///
/// Letters are case-insensitive. Esc and Ctrl-C forfeit. Keys that map to
/// no command yield `None`.
pub fn combat_key(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ch = match key.code {
        KeyCode::Esc => PlayerCommand::FORFEIT_KEY,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            PlayerCommand::FORFEIT_KEY
        }
        KeyCode::Char(ch) => ch.to_ascii_lowercase(),
        _ => return None,
    };
    PlayerCommand::from_char(ch).map(|_| ch)
}

/// First command in `keys`. Stops pulling at the first recognized key, so
/// anything after it stays queued.
pub fn first_command<I>(keys: I) -> Option<char>
where
    I: IntoIterator<Item = KeyEvent>,
{
    keys.into_iter().find_map(combat_key)
}

/// Blocks until a key is pressed.
pub fn wait_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(key);
        }
    }
}

/// Non-blocking crossterm poll used while a fight runs.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Option<char> {
        first_command(std::iter::from_fn(pending_key))
    }
}

/// Next pending key press without blocking. Non-key events are skipped.
fn pending_key() -> Option<KeyEvent> {
    loop {
        match event::poll(Duration::ZERO) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                tracing::warn!("Failed to poll terminal events: {}", e);
                return None;
            }
        }
        match event::read() {
            Ok(Event::Key(key)) => return Some(key),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to read terminal event: {}", e);
                return None;
            }
        }
    }
}
