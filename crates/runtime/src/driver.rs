//! Real-time loop around [`Combat::step`].
//!
//! The driver owns the clock: it measures elapsed wall time between
//! iterations, forwards one key press per iteration, renders a snapshot and
//! sleeps whatever is left of the tick budget.

use std::time::Duration;

use arena_core::{Combat, CombatOutcome, CombatSnapshot, GameEnv, PlayerCommand};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};

/// Non-blocking source of key presses.
pub trait InputSource {
    /// Returns the next pending key, if any, without waiting.
    fn poll(&mut self) -> Option<char>;
}

/// Receives a read-only view of the fight once per iteration.
pub trait HudSink {
    fn render(&mut self, snapshot: &CombatSnapshot) -> std::io::Result<()>;
}

/// Drives a fight to completion at a fixed target tick.
#[derive(Clone, Debug)]
pub struct CombatDriver {
    tick: Duration,
}

impl CombatDriver {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Runs `combat` until it reaches a terminal state.
    ///
    /// Unrecognized keys are dropped. Every new combat log line is also
    /// emitted as a `debug` event so the session log file carries the full
    /// fight.
    ///
    /// # Errors
    ///
    /// Fails if the environment lacks an oracle combat needs or if the HUD
    /// cannot draw.
    pub async fn run<I, H>(
        &self,
        combat: &mut Combat,
        env: &GameEnv<'_>,
        input: &mut I,
        hud: &mut H,
    ) -> Result<CombatOutcome>
    where
        I: InputSource + ?Sized,
        H: HudSink + ?Sized,
    {
        info!(
            player = %combat.player().name,
            opponent = %combat.opponent().name,
            "combat started"
        );

        let mut last = Instant::now();
        loop {
            let started = Instant::now();
            let dt = started.duration_since(last).as_secs_f64();
            last = started;

            let command = input.poll().and_then(PlayerCommand::from_char);
            let state = combat.step(env, dt, command)?;

            for entry in combat.log_mut().take_unread() {
                debug!(target: "arena::combat", "{entry}");
            }
            hud.render(&combat.snapshot(env))?;

            if state.is_terminal() {
                break;
            }

            let remaining = self.tick.saturating_sub(started.elapsed());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }

        let outcome = combat.outcome().ok_or(RuntimeError::NoOutcome)?;
        info!(
            state = %outcome.state,
            duration = outcome.duration,
            "combat finished"
        );
        Ok(outcome)
    }
}

impl Default for CombatDriver {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}
