//! PokerAI Engine — Playout Simulator
//!
//! One playout deals a random completion of the current hand and compares
//! the agent's showdown hand against the strongest opponent.
//!
//! Per playout:
//!   1. Build a deck from the cards still available
//!   2. Keep the revealed community cards, draw the rest
//!   3. Deal every opponent a private hand
//!   4. Score the agent and each opponent (hole + community)
//!   5. Win iff the agent strictly beats the best opponent
//!
//! Ties count as a loss for the agent.

use rand::Rng;

use crate::card::Card;
use crate::deck::Deck;
use crate::evaluator::Evaluator;
use crate::game::{GameState, MAX_OPPONENTS, NUM_COMMUNITY, NUM_HAND};

const SHOWDOWN_CARDS: usize = NUM_HAND + NUM_COMMUNITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Anything the coordinator can run in its playout loop.
///
/// Implementations are shared read-only between workers; each worker passes
/// its own generator.
pub trait Simulator: Sync {
    fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome;
}

/// The cards of one completed hand, before scoring.
#[derive(Debug, Clone)]
pub struct Deal {
    pub community: [Card; NUM_COMMUNITY],
    pub opponents: [[Card; NUM_HAND]; MAX_OPPONENTS],
    pub num_opponents: usize,
    /// What is left of the deck after dealing.
    pub deck: Deck,
}

impl Deal {
    pub fn opponents(&self) -> &[[Card; NUM_HAND]] {
        &self.opponents[..self.num_opponents]
    }
}

/// Showdown playouts of a game state, scored by an evaluator.
pub struct Showdown<'a, E> {
    state: &'a GameState,
    evaluator: &'a E,
}

impl<'a, E: Evaluator> Showdown<'a, E> {
    pub fn new(state: &'a GameState, evaluator: &'a E) -> Self {
        Self { state, evaluator }
    }

    /// Deal a random completion of the hand. A fresh deck every time.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Deal {
        let mut deck = Deck::from_mask(self.state.available());

        let revealed = self.state.community();
        let mut community = [Card::MIN; NUM_COMMUNITY];
        community[..revealed.len()].copy_from_slice(revealed);
        for slot in &mut community[revealed.len()..] {
            *slot = deck.draw(rng);
        }

        let num_opponents = self.state.num_opponents();
        let mut opponents = [[Card::MIN; NUM_HAND]; MAX_OPPONENTS];
        for hand in &mut opponents[..num_opponents] {
            for card in hand.iter_mut() {
                *card = deck.draw(rng);
            }
        }

        Deal { community, opponents, num_opponents, deck }
    }

    /// Score a completed deal from the agent's point of view.
    pub fn showdown(&self, deal: &Deal) -> Outcome {
        let mine = self.score(self.state.hand(), &deal.community);
        let best_opponent = deal
            .opponents()
            .iter()
            .map(|hand| self.score(hand, &deal.community))
            .max()
            .unwrap_or(0);

        if mine > best_opponent {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    #[inline]
    fn score(&self, hand: &[Card; NUM_HAND], community: &[Card; NUM_COMMUNITY]) -> u32 {
        let mut cards = [Card::MIN; SHOWDOWN_CARDS];
        cards[..NUM_HAND].copy_from_slice(hand);
        cards[NUM_HAND..].copy_from_slice(community);
        self.evaluator.score(&cards)
    }
}

impl<E: Evaluator> Simulator for Showdown<'_, E> {
    fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let deal = self.deal(rng);
        self.showdown(&deal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardMask;
    use crate::evaluator::HandRanks;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use serde_json::json;

    fn state(doc: serde_json::Value) -> GameState {
        GameState::from_json(&doc, MAX_OPPONENTS).unwrap()
    }

    /// Scores every hand the same.
    struct Flat;

    impl Evaluator for Flat {
        fn score(&self, _cards: &[Card]) -> u32 {
            100
        }
    }

    #[test]
    fn test_deal_conserves_cards() {
        let ranks = HandRanks::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        for (revealed, opponents) in [(0usize, 1usize), (3, 4), (4, 8), (5, 22)] {
            let board: Vec<u8> = (1..=revealed as u8).collect();
            let gs = state(json!({ "hand": [52, 51], "community": board, "num_opponents": opponents }));
            let initial = gs.available().len();
            let showdown = Showdown::new(&gs, &ranks);

            for _ in 0..200 {
                let deal = showdown.deal(&mut rng);
                let drawn = (NUM_COMMUNITY - revealed) + deal.opponents().len() * NUM_HAND;
                assert_eq!(drawn + deal.deck.len(), initial, "cards lost or created");

                // Every dealt card is distinct and came from the available set
                let mut seen = CardMask::EMPTY;
                let dealt = deal.community[revealed..]
                    .iter()
                    .chain(deal.opponents().iter().flatten())
                    .chain(deal.deck.remaining());
                for &card in dealt {
                    assert!(gs.available().contains(card), "{} was not available", card);
                    assert!(!seen.contains(card), "{} dealt twice", card);
                    seen.insert(card);
                }
                assert_eq!(&deal.community[..revealed], gs.community());
            }
        }
    }

    #[test]
    fn test_ties_lose() {
        let gs = state(json!({ "hand": ["As", "Ks"], "num_opponents": 2 }));
        let showdown = Showdown::new(&gs, &Flat);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(showdown.simulate(&mut rng), Outcome::Lose);
        }
    }

    #[test]
    fn test_no_opponents_always_wins() {
        let gs = state(json!({ "hand": ["2c", "7d"], "num_opponents": 0 }));
        let ranks = HandRanks::new();
        let showdown = Showdown::new(&gs, &ranks);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(showdown.simulate(&mut rng), Outcome::Win);
        }
    }

    #[test]
    fn test_royal_flush_never_loses() {
        let gs = state(json!({
            "hand": ["As", "Ks"],
            "community": ["Qs", "Js", "Ts", "2c", "3d"],
            "num_opponents": 5
        }));
        let ranks = HandRanks::new();
        let showdown = Showdown::new(&gs, &ranks);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        for _ in 0..500 {
            assert_eq!(showdown.simulate(&mut rng), Outcome::Win);
        }
    }

    #[test]
    fn test_strongest_opponent_decides() {
        // Bottom pair against eight random hands: any board pair beats it
        let gs = state(json!({
            "hand": ["2c", "2d"],
            "community": ["Ah", "Kh", "Qd", "9s", "7c"],
            "num_opponents": 8
        }));
        let ranks = HandRanks::new();
        let showdown = Showdown::new(&gs, &ranks);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
        let wins = (0..2000)
            .filter(|_| showdown.simulate(&mut rng) == Outcome::Win)
            .count();
        assert!(wins < 400, "deuces vs 8 opponents won {} of 2000", wins);
    }
}
