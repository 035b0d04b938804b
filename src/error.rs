//! PokerAI Engine — Errors
//!
//! Every fallible operation in the crate returns [`Result`]. Configuration
//! and game-state problems are caught before a round starts; the only error a
//! round itself can produce is [`EngineError::DegenerateRound`].

use thiserror::Error;

use crate::card::Card;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("card id {0} is outside 1..=52")]
    InvalidCard(u8),

    #[error("card {0} appears more than once")]
    DuplicateCard(Card),

    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("malformed document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The time budget expired before a single playout finished.
    #[error("round completed zero playouts; unable to decide this turn")]
    DegenerateRound,

    #[error("no game state has been received yet")]
    NoGameState,

    #[error("worker pool unavailable: {0}")]
    ThreadPool(String),
}
