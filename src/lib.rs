//! PokerAI Engine
//!
//! Decision engine for an online poker-playing agent. Given the public and
//! private information of the hand in progress, it estimates the agent's win
//! probability with concurrent Monte Carlo playouts under a wall-clock budget
//! and turns that probability into an action.
//!
//! ## Architecture
//!
//! ```text
//! polling loop (host)
//!     │  game-state JSON            ▲ action string
//!     ▼                             │
//! engine.rs  ─────────────────────  DecisionEngine facade
//!     ├── game.rs                   GameState + inbound document
//!     ├── coordinator.rs            worker pool, time budget, Tally
//!     │     └── playout.rs          one random completion → Win/Lose
//!     │           ├── deck.rs       swap-remove random draws
//!     │           └── evaluator.rs  hand scores (lookup tables)
//!     └── policy.rs                 probability → Fold / Call / Bet
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pokerai_engine::{DecisionEngine, EngineConfig, HandRanks};
//!
//! let mut engine = DecisionEngine::new(EngineConfig::default(), HandRanks::new())?;
//! engine.update_game_state(&serde_json::json!({
//!     "hand": ["As", "Kd"],
//!     "community": ["Ah", "7c", "2s"],
//!     "num_opponents": 3,
//!     "stack": 1500,
//!     "your_turn": true
//! }))?;
//! if engine.my_turn() {
//!     engine.best_action()?;
//!     println!("{}", engine.action_string());
//! }
//! # Ok::<(), pokerai_engine::EngineError>(())
//! ```

pub mod card;
pub mod config;
pub mod coordinator;
pub mod deck;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod logging;
pub mod playout;
pub mod policy;

#[cfg(feature = "node")]
mod node;

pub use card::{Card, CardMask};
pub use config::{EngineConfig, Thresholds};
pub use coordinator::{Coordinator, Tally};
pub use engine::DecisionEngine;
pub use error::{EngineError, Result};
pub use evaluator::{Evaluator, HandRanks};
pub use game::{GameState, GameStateDocument};
pub use logging::{Journal, LogSink, MemorySink, Sink};
pub use playout::{Outcome, Showdown, Simulator};
pub use policy::Action;
