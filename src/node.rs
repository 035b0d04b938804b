//! PokerAI Engine — N-API Entry Point
//!
//! Exposes the decision engine to a Node.js host (the process that owns the
//! network polling loop). Built with `--features node`.
//!
//! ```js
//! const { init, PokerAI } = require('./pokerai.node');
//! init();
//! const ai = new PokerAI({ workers: 4, time_budget_ms: 1000 });
//! ai.updateGameState(state);
//! if (ai.myTurn()) post(ai.getBestAction());
//! ```

use std::sync::OnceLock;

use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde::Deserialize;

use crate::config::EngineConfig;
use crate::engine::DecisionEngine;
use crate::error::EngineError;
use crate::evaluator::HandRanks;

static HAND_RANKS: OnceLock<HandRanks> = OnceLock::new();

fn hand_ranks() -> &'static HandRanks {
    HAND_RANKS.get_or_init(HandRanks::new)
}

fn to_napi(err: EngineError) -> Error {
    let status = match err {
        EngineError::DegenerateRound | EngineError::ThreadPool(_) | EngineError::Io(_) => {
            Status::GenericFailure
        }
        _ => Status::InvalidArg,
    };
    Error::new(status, err.to_string())
}

/// Install logging and build the hand-rank tables. Call once at startup.
#[napi]
pub fn init() -> Result<()> {
    env_logger::try_init().ok();
    log::info!("PokerAI engine initializing...");
    hand_ranks();
    log::info!("PokerAI engine ready");
    Ok(())
}

#[napi]
pub fn version() -> String {
    format!("pokerai-engine v{}", env!("CARGO_PKG_VERSION"))
}

#[napi(js_name = "PokerAI")]
pub struct PokerAi {
    engine: DecisionEngine<&'static HandRanks>,
}

#[napi]
impl PokerAi {
    /// `config` follows the JSON layout of `EngineConfig`; omitted fields
    /// take their defaults.
    #[napi(constructor)]
    pub fn new(config: Option<serde_json::Value>) -> Result<Self> {
        let config = match config {
            Some(value) => EngineConfig::deserialize(&value).map_err(|e| to_napi(e.into()))?,
            None => EngineConfig::default(),
        };
        let engine = DecisionEngine::new(config, hand_ranks()).map_err(to_napi)?;
        Ok(Self { engine })
    }

    #[napi]
    pub fn update_game_state(&mut self, state: serde_json::Value) -> Result<()> {
        self.engine.update_game_state(&state).map_err(to_napi)
    }

    #[napi]
    pub fn my_turn(&self) -> bool {
        self.engine.my_turn()
    }

    /// Run a round and return the action string to post.
    #[napi]
    pub fn get_best_action(&mut self) -> Result<String> {
        self.engine.best_action().map_err(to_napi)?;
        Ok(self.engine.action_string())
    }

    /// Human-readable line for the pending action.
    #[napi]
    pub fn describe_action(&self) -> Result<String> {
        let mut out = Vec::new();
        self.engine
            .write_action(&mut out)
            .map_err(|e| to_napi(e.into()))?;
        Ok(String::from_utf8_lossy(&out).trim_end().to_string())
    }
}
