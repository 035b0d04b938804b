//! PokerAI Engine — Decision Policy
//!
//! Win probability in, action out:
//!
//! | Win probability     | Action                      |
//! |---------------------|-----------------------------|
//! | `p > bet`           | Bet `floor(stack * p)`      |
//! | `call < p <= bet`   | Call                        |
//! | `p <= call`         | Fold                        |
//!
//! Deliberately naive: no bluffing, no opponent modelling.

use std::fmt;

use crate::config::Thresholds;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call,
    Bet(u32),
}

impl Action {
    /// Wire form posted back to the game server.
    pub fn to_wire(self) -> String {
        match self {
            Action::Fold => "action_name=fold".to_string(),
            Action::Call => "action_name=call".to_string(),
            Action::Bet(amount) => format!("action_name=bet&amount={amount}"),
        }
    }

    /// Fold < Call < Bet, bets ordered by amount.
    fn strength(self) -> (u8, u32) {
        match self {
            Action::Fold => (0, 0),
            Action::Call => (1, 0),
            Action::Bet(amount) => (2, amount),
        }
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.strength().cmp(&other.strength())
    }
}

/// Human-readable line.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "ACTION:\tFOLDING"),
            Action::Call => write!(f, "ACTION:\tCALLING"),
            Action::Bet(amount) => write!(f, "ACTION:\tBETTING {amount}"),
        }
    }
}

/// Wire form of a possibly-unset action. Unset is sent as a fold.
pub fn wire_or_fold(action: Option<Action>) -> String {
    action.unwrap_or(Action::Fold).to_wire()
}

/// Pick an action from a round's totals.
///
/// A round with zero playouts has no probability to act on and is reported
/// as [`EngineError::DegenerateRound`].
pub fn decide(games_won: u64, games_simulated: u64, stack: u32, thresholds: &Thresholds) -> Result<Action> {
    if games_simulated == 0 {
        return Err(EngineError::DegenerateRound);
    }
    let win_probability = games_won as f64 / games_simulated as f64;
    Ok(decide_probability(win_probability, stack, thresholds))
}

pub fn decide_probability(win_probability: f64, stack: u32, thresholds: &Thresholds) -> Action {
    if win_probability > thresholds.bet {
        Action::Bet((stack as f64 * win_probability).floor() as u32)
    } else if win_probability > thresholds.call {
        Action::Call
    } else {
        Action::Fold
    }
}
