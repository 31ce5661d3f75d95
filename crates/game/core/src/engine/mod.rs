//! Real-time duel loop.
//!
//! [`Combat`] owns both combatants and the rolling log. The driver calls
//! [`Combat::step`] once per tick with the measured elapsed time and at most
//! one player command; everything else (effect ticks, bar fills, attack
//! resolution, terminal checks) happens inside in a fixed order.

mod log;
mod snapshot;
mod state;

pub use log::{CombatLog, LogEntry};
pub use snapshot::{CombatSnapshot, CombatantView, EffectView};
pub use state::{CombatOutcome, CombatState, DamageTotals, Side};

use crate::action::{ActionKey, PlayerCommand};
use crate::combat::{ResolveContext, resolve, tick_effects};
use crate::config::CombatConfig;
use crate::env::{ActionOracle, GameEnv, OracleError};
use crate::state::Entity;
use crate::stats::bar_gain;

/// One duel between a player and an opponent.
#[derive(Clone, Debug)]
pub struct Combat {
    player: Entity,
    opponent: Entity,
    log: CombatLog,
    state: CombatState,
    elapsed: f64,
    config: CombatConfig,
    session_seed: u64,
    /// Bumped on every resolution so rolls never repeat within a fight.
    nonce: u64,
}

impl Combat {
    /// Starts a fight: clears bars and session counters, logs the opening.
    pub fn new(mut player: Entity, mut opponent: Entity, config: CombatConfig, session_seed: u64) -> Self {
        for entity in [&mut player, &mut opponent] {
            entity.bar = 0.0;
            entity.damage_dealt = 0.0;
            entity.damage_taken = 0.0;
        }

        let mut log = CombatLog::new();
        log.push(
            0.0,
            format!("Combat starts: {} vs {}!", player.name, opponent.name),
        );
        if let Some(text) = opponent.npc_template().map(|npc| npc.start_text()) {
            log.push(0.0, text);
        }

        Self {
            player,
            opponent,
            log,
            state: CombatState::Active,
            elapsed: 0.0,
            config,
            session_seed,
            nonce: 0,
        }
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn opponent(&self) -> &Entity {
        &self.opponent
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut CombatLog {
        &mut self.log
    }

    /// Advances the fight by `dt` seconds.
    ///
    /// Non-positive `dt` is replaced by the configured tick. Terminal states
    /// are sticky: stepping a finished fight changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `OracleError` if `env` lacks the action table or RNG. The
    /// check runs before anything moves, so a failed step leaves the fight
    /// untouched.
    pub fn step(
        &mut self,
        env: &GameEnv<'_>,
        dt: f64,
        command: Option<PlayerCommand>,
    ) -> Result<CombatState, OracleError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        // nothing below may fail halfway through a tick
        env.actions()?;
        env.rng()?;

        let dt = if dt > 0.0 { dt } else { self.config.tick_seconds };
        self.elapsed += dt;

        match command {
            Some(PlayerCommand::Queue(key)) => self.queue(env, key),
            Some(PlayerCommand::Forfeit) => {
                self.log.push(self.elapsed, "Player forfeits.");
                return Ok(self.conclude(CombatState::Forfeited));
            }
            None => {}
        }

        let lines = tick_effects(&mut self.player, dt);
        self.log.extend(self.elapsed, lines);
        self.player.cooldowns.tick(dt);
        let lines = tick_effects(&mut self.opponent, dt);
        self.log.extend(self.elapsed, lines);

        if self.player.is_defeated() {
            return Ok(self.conclude(CombatState::OpponentWon));
        }
        if self.opponent.is_defeated() {
            return Ok(self.conclude(CombatState::PlayerWon));
        }

        for entity in [&mut self.player, &mut self.opponent] {
            entity.bar = (entity.bar + bar_gain(entity.fill_seconds, dt)).min(CombatConfig::BAR_FULL);
        }

        if self.player.bar >= CombatConfig::BAR_FULL {
            self.player_turn(env)?;
            self.player.bar = 0.0;
        }
        if self.opponent.is_defeated() {
            return Ok(self.conclude(CombatState::PlayerWon));
        }

        if self.opponent.bar >= CombatConfig::BAR_FULL {
            self.opponent_turn(env)?;
            self.opponent.bar = 0.0;
            self.opponent.advance_sequence();
        }
        if self.player.is_defeated() {
            return Ok(self.conclude(CombatState::OpponentWon));
        }

        Ok(self.state)
    }

    fn queue(&mut self, env: &GameEnv<'_>, key: ActionKey) {
        self.player.queue(key);
        let fires = self
            .player
            .action_for_key(key)
            .and_then(|id| env.actions().ok()?.action(id))
            .map_or("Invalid/CD", |action| action.name.as_str());
        self.log.push(
            self.elapsed,
            format!("Player queues {} ({}).", key.label(), fires),
        );
    }

    fn player_turn(&mut self, env: &GameEnv<'_>) -> Result<(), OracleError> {
        let actions = env.actions()?;
        let key = self.player.queued_key().unwrap_or(ActionKey::Melee);
        let action = self
            .player
            .action_for_key(key)
            .filter(|&id| actions.action(id).is_some());

        let Some(action) = action else {
            self.log.push(
                self.elapsed,
                format!(
                    "Player's action ({}) fizzles (unavailable/cooldown).",
                    key.as_char()
                ),
            );
            return Ok(());
        };

        self.nonce += 1;
        let ctx = ResolveContext {
            env: *env,
            config: &self.config,
            session_seed: self.session_seed,
            nonce: self.nonce,
        };
        let report = resolve(&mut self.player, &mut self.opponent, action, &ctx)?;
        self.log.extend(self.elapsed, report.lines);
        Ok(())
    }

    fn opponent_turn(&mut self, env: &GameEnv<'_>) -> Result<(), OracleError> {
        let actions = env.actions()?;
        let Some((position, action)) = self.opponent.next_sequence_action() else {
            return Ok(());
        };

        let Some(action) = action.filter(|&id| actions.action(id).is_some()) else {
            let shown = action.map_or_else(|| "none".to_owned(), |id| id.to_string());
            self.log.push(
                self.elapsed,
                format!(
                    "{} confused (invalid action ID: {} from act{}).",
                    self.opponent.name, shown, position
                ),
            );
            return Ok(());
        };

        self.nonce += 1;
        let ctx = ResolveContext {
            env: *env,
            config: &self.config,
            session_seed: self.session_seed,
            nonce: self.nonce,
        };
        let report = resolve(&mut self.opponent, &mut self.player, action, &ctx)?;
        self.log.extend(self.elapsed, report.lines);
        Ok(())
    }

    fn conclude(&mut self, state: CombatState) -> CombatState {
        self.state = state;
        let text = match state {
            CombatState::PlayerWon => self.opponent.npc_template().map(|npc| npc.death_text()),
            CombatState::OpponentWon if self.player.is_defeated() => {
                self.opponent.npc_template().map(|npc| npc.win_text())
            }
            _ => None,
        };
        if let Some(text) = text {
            self.log.push(self.elapsed, text);
        }
        state
    }

    /// Read-only view for the HUD.
    pub fn snapshot(&self, env: &GameEnv<'_>) -> CombatSnapshot {
        let actions = env.actions().ok();
        CombatSnapshot {
            state: self.state,
            elapsed: self.elapsed,
            player: CombatantView::of(&self.player, actions, self.elapsed),
            opponent: CombatantView::of(&self.opponent, actions, self.elapsed),
            log: self.log.iter().cloned().collect(),
        }
    }

    /// Terminal result, or `None` while the fight is still running.
    pub fn outcome(&self) -> Option<CombatOutcome> {
        let winner = self.state.winner()?;
        Some(CombatOutcome {
            state: self.state,
            winner,
            forfeited_by: (self.state == CombatState::Forfeited).then_some(Side::Player),
            player: DamageTotals {
                dealt: self.player.damage_dealt,
                taken: self.player.damage_taken,
            },
            opponent: DamageTotals {
                dealt: self.opponent.damage_dealt,
                taken: self.opponent.damage_taken,
            },
            duration: self.elapsed,
        })
    }

    /// Hands both combatants back, e.g. for rewards and a rematch.
    pub fn into_parts(self) -> (Entity, Entity, CombatLog) {
        (self.player, self.opponent, self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionDefinition, ActionId, DamageSource, EffectTiming};
    use crate::combat::apply_effect;
    use crate::env::{Catalog, CharacterTemplate, NpcTemplate, RngOracle};
    use crate::stats::EffectTarget;

    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    const RNG: Fixed = Fixed(u32::MAX);

    fn catalog() -> Catalog {
        Catalog::new(
            [
                ActionDefinition::attack(1, "Punch", DamageSource::Physical, 1000.0),
                ActionDefinition::attack(2, "Tickle", DamageSource::Physical, 0.0),
                ActionDefinition::attack(3, "Venom", DamageSource::None, 50.0)
                    .with_debuff(EffectTarget::Hp)
                    .with_effect(5.0, EffectTiming::Tick),
            ],
            [],
        )
    }

    fn combat(opponent_hp: i32, sequence: &[Option<u32>]) -> Combat {
        let hero = CharacterTemplate {
            name: "Hero".to_owned(),
            ..CharacterTemplate::default()
        };
        let mut npc = NpcTemplate {
            name: "Rat".to_owned(),
            hp: opponent_hp,
            atk_pw: 0,
            dodge: 0,
            crits: 0,
            text_death: Some("The rat squeaks its last.".to_owned()),
            ..NpcTemplate::default()
        };
        for id in sequence {
            npc.sequence.push(id.map(ActionId));
        }
        let catalog = catalog();
        Combat::new(
            Entity::player(&hero, &catalog),
            Entity::opponent(&npc),
            CombatConfig::default(),
            42,
        )
    }

    fn texts(combat: &Combat) -> Vec<String> {
        combat.log().iter().map(|e| e.text.clone()).collect()
    }

    #[test]
    fn opening_lines_are_logged() {
        let combat = combat(100, &[Some(2)]);
        assert_eq!(
            texts(&combat),
            vec!["Combat starts: Hero vs Rat!".to_owned(), "Rat appears!".to_owned()]
        );
        assert_eq!(combat.state(), CombatState::Active);
        assert!(combat.outcome().is_none());
    }

    #[test]
    fn missing_oracle_leaves_the_tick_unapplied() {
        let catalog = catalog();
        let actions: &dyn ActionOracle = &catalog;
        let env = GameEnv::new(Some(actions), None, None);
        let mut combat = combat(100, &[Some(2)]);
        combat.player.bar = 99.9;
        let logged = combat.log().len();

        let err = combat.step(&env, 0.5, None).unwrap_err();

        assert_eq!(err, OracleError::RngNotAvailable);
        assert_eq!(combat.player().bar, 99.9);
        assert_eq!(combat.elapsed(), 0.0);
        assert_eq!(combat.log().len(), logged);
        assert_eq!(combat.state(), CombatState::Active);

        let rng = RNG;
        let env = GameEnv::from_catalog(&catalog, &rng);
        assert!(combat.step(&env, 0.5, None).is_ok());
        assert!(combat.elapsed() > 0.0);
    }

    #[test]
    fn lethal_player_attack_ends_before_opponent_acts() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(50, &[Some(1)]);
        combat.player.bar = 99.9;
        combat.opponent.bar = 99.9;

        let state = combat.step(&env, 0.1, None).unwrap();

        assert_eq!(state, CombatState::PlayerWon);
        assert_eq!(combat.player().hp, combat.player().max_hp());
        assert_eq!(combat.opponent().bar, CombatConfig::BAR_FULL);
        assert_eq!(
            combat.log().latest().map(|e| e.text.as_str()),
            Some("The rat squeaks its last.")
        );

        let outcome = combat.outcome().unwrap();
        assert!(outcome.player_won());
        assert_eq!(outcome.player.dealt, 50.0);
        assert_eq!(outcome.opponent.taken, 50.0);
        assert_eq!(outcome.forfeited_by, None);
    }

    #[test]
    fn each_bar_fill_resets_only_its_own_bar() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(100_000, &[Some(2)]);
        combat.player.bar = 99.9;
        combat.opponent.bar = 50.0;

        combat.step(&env, 0.1, None).unwrap();
        assert_eq!(combat.player().bar, 0.0);
        let opponent_bar = combat.opponent().bar;
        assert!(opponent_bar > 50.0 && opponent_bar < 100.0);

        combat.opponent.bar = 99.9;
        combat.step(&env, 0.1, None).unwrap();
        assert_eq!(combat.opponent().bar, 0.0);
        let player_bar = combat.player().bar;
        assert!(player_bar > 0.0 && player_bar < 100.0);
        assert!(texts(&combat).contains(&"Rat uses Tickle on Hero! but deals no damage.".to_owned()));
    }

    #[test]
    fn forfeit_is_terminal_and_sticky() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(100, &[Some(2)]);

        let state = combat
            .step(&env, 0.1, Some(PlayerCommand::Forfeit))
            .unwrap();
        assert_eq!(state, CombatState::Forfeited);
        assert_eq!(combat.log().latest().map(|e| e.text.as_str()), Some("Player forfeits."));

        let elapsed = combat.elapsed();
        assert_eq!(combat.step(&env, 0.1, None).unwrap(), CombatState::Forfeited);
        assert_eq!(combat.elapsed(), elapsed);

        let outcome = combat.outcome().unwrap();
        assert_eq!(outcome.winner, Side::Opponent);
        assert_eq!(outcome.forfeited_by, Some(Side::Player));
    }

    #[test]
    fn unavailable_key_is_queued_then_fizzles() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(100, &[Some(2)]);

        combat
            .step(&env, 0.1, Some(PlayerCommand::Queue(ActionKey::MainHand)))
            .unwrap();
        combat.player.bar = 99.9;
        combat.step(&env, 0.1, None).unwrap();

        let log = texts(&combat);
        assert!(log.contains(&"Player queues Main-Hand Action (Slot 6) (Invalid/CD).".to_owned()));
        assert!(log.contains(&"Player's action (z) fizzles (unavailable/cooldown).".to_owned()));
        assert_eq!(combat.opponent().hp, 100.0);
        assert_eq!(combat.player().bar, 0.0);
    }

    #[test]
    fn missing_sequence_entry_confuses_opponent() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(100, &[None, Some(99)]);

        combat.opponent.bar = 99.9;
        combat.step(&env, 0.1, None).unwrap();
        combat.opponent.bar = 99.9;
        combat.step(&env, 0.1, None).unwrap();

        let log = texts(&combat);
        assert!(log.contains(&"Rat confused (invalid action ID: none from act1).".to_owned()));
        assert!(log.contains(&"Rat confused (invalid action ID: 99 from act2).".to_owned()));
    }

    #[test]
    fn damage_over_time_kill_is_seen_before_bars_move() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(1, &[Some(2)]);
        let venom = catalog.action(ActionId(3)).cloned().unwrap();
        apply_effect(&mut combat.opponent, &venom, false);

        let state = combat.step(&env, 0.1, None).unwrap();

        assert_eq!(state, CombatState::PlayerWon);
        assert_eq!(combat.player().bar, 0.0);
        assert_eq!(combat.opponent().damage_taken, 1.0);
    }

    #[test]
    fn non_positive_elapsed_uses_tick() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let mut combat = combat(100, &[Some(2)]);

        combat.step(&env, 0.0, None).unwrap();
        combat.step(&env, -3.0, None).unwrap();

        assert!((combat.elapsed() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn snapshot_describes_both_sides() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog, &RNG);
        let combat = combat(100, &[Some(2)]);

        let snapshot = combat.snapshot(&env);

        assert_eq!(snapshot.player.queued, "Basic Melee (Punch)");
        assert_eq!(snapshot.opponent.queued, "act1: Tickle");
        assert_eq!(snapshot.opponent.hp, 100.0);
        assert_eq!(snapshot.log.len(), 2);
        assert_eq!(snapshot.player.dps, 0.0);
    }
}
