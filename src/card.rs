//! PokerAI Engine — Cards
//!
//! ## Card Encoding
//!
//! Each card is an ID 1-52, matching the hand-rank lookup data:
//!   - `rank = (id - 1) >> 2`  (0=2, 1=3, ..., 12=A)
//!   - `suit = (id - 1) & 3`   (0=♣, 1=♦, 2=♥, 3=♠)
//!
//! Text notation is rank then suit, e.g. `As`, `Td`, `7c`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};

pub const NUM_DECK: usize = 52;

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    /// Lowest card id; used as filler for fixed-size arrays before dealing.
    pub const MIN: Card = Card(1);

    pub fn new(id: u8) -> Result<Self> {
        if (1..=NUM_DECK as u8).contains(&id) {
            Ok(Self(id))
        } else {
            Err(EngineError::InvalidCard(id))
        }
    }

    /// Build from rank (0=2 .. 12=A) and suit (0..4).
    pub fn from_parts(rank: u8, suit: u8) -> Result<Self> {
        if rank > 12 || suit > 3 {
            return Err(EngineError::InvalidState(format!(
                "rank {rank} / suit {suit} out of range"
            )));
        }
        Ok(Self(rank * 4 + suit + 1))
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn rank(self) -> usize {
        ((self.0 - 1) >> 2) as usize
    }

    #[inline]
    pub fn suit(self) -> usize {
        ((self.0 - 1) & 3) as usize
    }

    /// Bit position in a [`CardMask`].
    #[inline]
    fn bit(self) -> u64 {
        1u64 << (self.0 - 1)
    }
}

impl TryFrom<u8> for Card {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self> {
        Self::new(id)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RANK_CHARS[self.rank()], SUIT_CHARS[self.suit()])
    }
}

impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || EngineError::InvalidState(format!("cannot parse card {s:?}"));
        let mut chars = s.chars();
        let (r, su) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => (r, su),
            _ => return Err(bad()),
        };
        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == r.to_ascii_uppercase())
            .ok_or_else(bad)?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == su.to_ascii_lowercase())
            .ok_or_else(bad)?;
        Self::from_parts(rank as u8, suit as u8)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

/// Documents may carry either the numeric id or the text notation.
#[derive(Deserialize)]
#[serde(untagged)]
enum CardRepr {
    Id(u8),
    Text(String),
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match CardRepr::deserialize(deserializer)? {
            CardRepr::Id(id) => Card::new(id),
            CardRepr::Text(s) => s.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

// ── Card Mask ───────────────────────────────────────────────────────

/// The 52-card indicator of which cards are still available to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardMask(u64);

impl CardMask {
    pub const EMPTY: CardMask = CardMask(0);
    pub const FULL: CardMask = CardMask((1u64 << NUM_DECK) - 1);

    #[inline]
    pub fn contains(self, card: Card) -> bool {
        self.0 & card.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, card: Card) {
        self.0 |= card.bit();
    }

    #[inline]
    pub fn remove(&mut self, card: Card) {
        self.0 &= !card.bit();
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Cards in ascending id order.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let i = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Card(i + 1))
        })
    }
}

impl FromIterator<Card> for CardMask {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut mask = CardMask::EMPTY;
        for card in iter {
            mask.insert(card);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_encoding() {
        // A♠ is the last card, 2♣ the first
        let ace = Card::new(52).unwrap();
        assert_eq!(ace.rank(), 12);
        assert_eq!(ace.suit(), 3);
        assert_eq!(ace.to_string(), "As");
        assert_eq!(Card::new(1).unwrap().to_string(), "2c");
    }

    #[test]
    fn test_card_range() {
        assert!(matches!(Card::new(0), Err(EngineError::InvalidCard(0))));
        assert!(matches!(Card::new(53), Err(EngineError::InvalidCard(53))));
    }

    #[test]
    fn test_parse_notation() {
        for id in 1..=52u8 {
            let card = Card::new(id).unwrap();
            let parsed: Card = card.to_string().parse().unwrap();
            assert_eq!(parsed, card, "notation {} should parse back", card);
        }
        assert_eq!("ah".parse::<Card>().unwrap(), "Ah".parse::<Card>().unwrap());
        assert!("A".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
    }

    #[test]
    fn test_deserialize_id_or_text() {
        let cards: Vec<Card> = serde_json::from_str(r#"[52, "Td", 1]"#).unwrap();
        assert_eq!(cards[0].to_string(), "As");
        assert_eq!(cards[1].to_string(), "Td");
        assert_eq!(cards[2].to_string(), "2c");
        assert!(serde_json::from_str::<Card>("60").is_err());
    }

    #[test]
    fn test_mask_operations() {
        let mut mask = CardMask::FULL;
        assert_eq!(mask.len(), 52);

        let ace = Card::new(52).unwrap();
        mask.remove(ace);
        assert!(!mask.contains(ace));
        assert_eq!(mask.len(), 51);

        let ids: Vec<u8> = mask.iter().map(Card::id).collect();
        assert_eq!(ids, (1..=51).collect::<Vec<u8>>());
    }
}
