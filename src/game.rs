//! PokerAI Engine — Game State
//!
//! The authoritative snapshot of the hand in progress. A state is built from
//! the document the polling loop receives and replaced wholesale on every
//! update; it is read-only while a round runs.

use serde::Deserialize;

use crate::card::{Card, CardMask, NUM_DECK};
use crate::error::{EngineError, Result};

/// Private cards per player.
pub const NUM_HAND: usize = 2;
/// Community cards at showdown.
pub const NUM_COMMUNITY: usize = 5;
/// Most opponents a full deck can serve: (52 - 2 - 5) / 2.
pub const MAX_OPPONENTS: usize = (NUM_DECK - NUM_HAND - NUM_COMMUNITY) / NUM_HAND;

/// Game state as delivered by the polling collaborator.
///
/// Field aliases accept both the client's names and the board/hole naming.
/// Card entries may be ids (1-52) or text (`"As"`).
#[derive(Debug, Clone, Deserialize)]
pub struct GameStateDocument {
    #[serde(alias = "hole_cards")]
    pub hand: Vec<Card>,
    #[serde(default, alias = "board_cards")]
    pub community: Vec<Card>,
    /// Cards known to be out of play (burned, exposed mucks).
    #[serde(default)]
    pub dead: Vec<Card>,
    #[serde(alias = "opponents")]
    pub num_opponents: usize,
    #[serde(default)]
    pub stack: u32,
    #[serde(default, alias = "my_turn")]
    pub your_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    hand: [Card; NUM_HAND],
    community: [Card; NUM_COMMUNITY],
    community_len: usize,
    available: CardMask,
    num_opponents: usize,
    stack: u32,
    your_turn: bool,
}

impl GameState {
    /// Validate a document and derive the set of cards still available.
    ///
    /// Guarantees that every playout has enough cards: the community cards
    /// still to come plus every opponent's hand fit in the remaining deck.
    pub fn from_document(doc: &GameStateDocument, max_opponents: usize) -> Result<Self> {
        if doc.hand.len() != NUM_HAND {
            return Err(EngineError::InvalidState(format!(
                "expected {} hole cards, got {}",
                NUM_HAND,
                doc.hand.len()
            )));
        }
        if doc.community.len() > NUM_COMMUNITY {
            return Err(EngineError::InvalidState(format!(
                "at most {} community cards, got {}",
                NUM_COMMUNITY,
                doc.community.len()
            )));
        }
        let max_opponents = max_opponents.min(MAX_OPPONENTS);
        if doc.num_opponents > max_opponents {
            return Err(EngineError::InvalidState(format!(
                "{} opponents exceeds the maximum of {}",
                doc.num_opponents, max_opponents
            )));
        }

        let mut available = CardMask::FULL;
        for &card in doc.hand.iter().chain(&doc.community).chain(&doc.dead) {
            if !available.contains(card) {
                return Err(EngineError::DuplicateCard(card));
            }
            available.remove(card);
        }

        let needed = (NUM_COMMUNITY - doc.community.len()) + doc.num_opponents * NUM_HAND;
        if needed > available.len() {
            return Err(EngineError::InvalidState(format!(
                "playouts need {} cards but only {} remain",
                needed,
                available.len()
            )));
        }

        let mut hand = [Card::MIN; NUM_HAND];
        hand.copy_from_slice(&doc.hand);
        let mut community = [Card::MIN; NUM_COMMUNITY];
        community[..doc.community.len()].copy_from_slice(&doc.community);

        Ok(Self {
            hand,
            community,
            community_len: doc.community.len(),
            available,
            num_opponents: doc.num_opponents,
            stack: doc.stack,
            your_turn: doc.your_turn,
        })
    }

    /// Parse and validate a JSON document.
    pub fn from_json(value: &serde_json::Value, max_opponents: usize) -> Result<Self> {
        let doc = GameStateDocument::deserialize(value)?;
        Self::from_document(&doc, max_opponents)
    }

    pub fn hand(&self) -> &[Card; NUM_HAND] {
        &self.hand
    }

    /// Community cards revealed so far.
    pub fn community(&self) -> &[Card] {
        &self.community[..self.community_len]
    }

    pub fn available(&self) -> CardMask {
        self.available
    }

    pub fn num_opponents(&self) -> usize {
        self.num_opponents
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }

    pub fn your_turn(&self) -> bool {
        self.your_turn
    }
}
