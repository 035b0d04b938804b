//! PokerAI Engine — Decision Engine
//!
//! The facade the polling loop talks to:
//!
//! ```text
//! poll → update_game_state ─┐
//!                           ├─ my_turn? → best_action → action_string → post
//!                           └─ (pending action reset)
//! ```
//!
//! One decision is live per game-state update. Rounds never overlap: a
//! round borrows the engine mutably and returns only after every worker has
//! merged.

use std::io::{self, Write};
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::coordinator::{Coordinator, Tally};
use crate::error::{EngineError, Result};
use crate::evaluator::Evaluator;
use crate::game::GameState;
use crate::logging::{Journal, LogSink, Sink};
use crate::playout::Showdown;
use crate::policy::{self, Action};

pub struct DecisionEngine<E> {
    config: EngineConfig,
    coordinator: Coordinator,
    evaluator: E,
    journal: Journal,
    game: Option<GameState>,
    action: Option<Action>,
    last_round: Option<Tally>,
}

impl<E: Evaluator> DecisionEngine<E> {
    /// Validate the config and build the worker pool. Logs through `log`.
    pub fn new(config: EngineConfig, evaluator: E) -> Result<Self> {
        Self::with_sink(config, evaluator, Arc::new(LogSink))
    }

    pub fn with_sink(config: EngineConfig, evaluator: E, sink: Arc<dyn Sink>) -> Result<Self> {
        config.validate()?;
        let journal = Journal::new(config.log_level, sink);
        let coordinator = Coordinator::from_config(&config, journal.clone())?;

        Ok(Self {
            config,
            coordinator,
            evaluator,
            journal,
            game: None,
            action: None,
            last_round: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the game state from a polled document.
    ///
    /// The pending action is reset first. A document that fails validation
    /// leaves the engine with no game state, so nothing is decided from a
    /// stale hand.
    pub fn update_game_state(&mut self, document: &serde_json::Value) -> Result<()> {
        self.action = None;
        self.game = None;
        let state = GameState::from_json(document, self.config.max_opponents)?;
        self.game = Some(state);
        Ok(())
    }

    /// Replace the game state with an already-validated snapshot.
    pub fn set_game_state(&mut self, state: GameState) {
        self.action = None;
        self.game = Some(state);
    }

    pub fn game_state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn my_turn(&self) -> bool {
        self.game.as_ref().is_some_and(GameState::your_turn)
    }

    /// Run a Monte Carlo round on the current state and decide.
    pub fn best_action(&mut self) -> Result<Action> {
        let game = self.game.as_ref().ok_or(EngineError::NoGameState)?;

        let showdown = Showdown::new(game, &self.evaluator);
        let tally = self.coordinator.run_round(&showdown);
        self.last_round = Some(tally);

        self.journal.debug(format_args!("Simulated {} games.", tally.simulated));
        if let Some(p) = tally.win_probability() {
            self.journal.debug(format_args!("Win probability: {p:.6}"));
        }

        let action = policy::decide(tally.won, tally.simulated, game.stack(), &self.config.thresholds)?;
        self.action = Some(action);
        Ok(action)
    }

    /// The decision for the current game state, if one was made.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Wire form of the pending action; folds when none is set.
    pub fn action_string(&self) -> String {
        policy::wire_or_fold(self.action)
    }

    /// Human-readable decision line.
    pub fn write_action<W: Write>(&self, mut out: W) -> io::Result<()> {
        match self.action {
            Some(action) => writeln!(out, "{action}"),
            None => writeln!(out, "No action set"),
        }
    }

    /// Totals of the most recent round.
    pub fn last_round(&self) -> Option<Tally> {
        self.last_round
    }
}
