//! PokerAI Engine — Deck
//!
//! A randomized queue over the cards still available in a hand. Drawing
//! swaps the chosen slot with the last live slot and shrinks the live range,
//! so removal is O(1) and a card's position never biases later draws.

use rand::Rng;

use crate::card::{Card, CardMask, NUM_DECK};

/// One deck per playout. Never shared between workers.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; NUM_DECK],
    len: usize,
}

impl Deck {
    /// Build a deck holding exactly the cards marked available.
    pub fn from_mask(available: CardMask) -> Self {
        let mut cards = [Card::MIN; NUM_DECK];
        let mut len = 0;
        for card in available.iter() {
            cards[len] = card;
            len += 1;
        }
        Self { cards, len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The cards still live, in no particular order.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[..self.len]
    }

    /// Remove and return one uniformly random remaining card.
    ///
    /// Drawing from an empty deck is a caller bug: game states are validated
    /// so the per-hand card budget always fits the deck.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        debug_assert!(self.len > 0, "draw from an empty deck");
        let index = rng.gen_range(0..self.len);
        let card = self.cards[index];
        self.len -= 1;
        self.cards[index] = self.cards[self.len];
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_draw_never_repeats() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..50 {
            let mut deck = Deck::from_mask(CardMask::FULL);
            let mut seen = CardMask::EMPTY;
            while !deck.is_empty() {
                let before = deck.len();
                let card = deck.draw(&mut rng);
                assert!(!seen.contains(card), "card {} drawn twice", card);
                assert_eq!(deck.len(), before - 1, "each draw removes exactly one card");
                seen.insert(card);
            }
            assert_eq!(seen, CardMask::FULL);
        }
    }

    #[test]
    fn test_deck_respects_mask() {
        let mut mask = CardMask::FULL;
        for id in [1u8, 2, 3, 52] {
            mask.remove(Card::new(id).unwrap());
        }
        let mut deck = Deck::from_mask(mask);
        assert_eq!(deck.len(), 48);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        while !deck.is_empty() {
            let card = deck.draw(&mut rng);
            assert!(mask.contains(card), "drew unavailable card {}", card);
        }
    }

    #[test]
    fn test_draw_is_roughly_uniform() {
        // 4 cards × 40k draws: each should land near 25%
        let mask: CardMask = (1..=4u8).map(|id| Card::new(id).unwrap()).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut counts = [0u32; 4];
        for _ in 0..40_000 {
            let mut deck = Deck::from_mask(mask);
            counts[deck.draw(&mut rng).id() as usize - 1] += 1;
        }
        for (i, &n) in counts.iter().enumerate() {
            let share = n as f64 / 40_000.0;
            assert!((share - 0.25).abs() < 0.02, "card {} drawn {:.3} of the time", i + 1, share);
        }
    }
}
