//! PokerAI Engine — Hand Evaluator
//!
//! Lookup-table hand evaluator. The playout simulator only depends on the
//! [`Evaluator`] contract; [`HandRanks`] is the implementation shipped with
//! the engine.
//!
//! ## Scores (higher = better)
//!
//! `score = category << 20 | tiebreak`, where the tiebreak packs the ranks
//! that decide the hand within its category, 4 bits each, most significant
//! first.
//!
//! | Category | Hand Type        |
//! |----------|------------------|
//! | 8        | Straight Flush   |
//! | 7        | Four of a Kind   |
//! | 6        | Full House       |
//! | 5        | Flush            |
//! | 4        | Straight         |
//! | 3        | Three of a Kind  |
//! | 2        | Two Pair         |
//! | 1        | One Pair         |
//! | 0        | High Card        |

use std::sync::Arc;

use crate::card::Card;

/// Maps a set of cards to a comparable strength. Must be pure and
/// deterministic: it is called concurrently from every worker.
pub trait Evaluator: Send + Sync {
    fn score(&self, cards: &[Card]) -> u32;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    #[inline]
    fn score(&self, cards: &[Card]) -> u32 {
        (**self).score(cards)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Arc<E> {
    #[inline]
    fn score(&self, cards: &[Card]) -> u32 {
        (**self).score(cards)
    }
}

const HIGH_CARD: u32 = 0;
const PAIR: u32 = 1;
const TWO_PAIR: u32 = 2;
const TRIPS: u32 = 3;
const STRAIGHT: u32 = 4;
const FLUSH: u32 = 5;
const FULL_HOUSE: u32 = 6;
const QUADS: u32 = 7;
const STRAIGHT_FLUSH: u32 = 8;

const CATEGORY_SHIFT: u32 = 20;

// Rank masks of the ten straights, best first; the last one is the wheel.
const STRAIGHTS: [u32; 10] = [
    0b1111100000000, // A-K-Q-J-T
    0b0111110000000, // K-Q-J-T-9
    0b0011111000000, // Q-J-T-9-8
    0b0001111100000, // J-T-9-8-7
    0b0000111110000, // T-9-8-7-6
    0b0000011111000, // 9-8-7-6-5
    0b0000001111100, // 8-7-6-5-4
    0b0000000111110, // 7-6-5-4-3
    0b0000000011111, // 6-5-4-3-2
    0b1000000001111, // 5-4-3-2-A (wheel)
];

// ── Lookup Evaluator ────────────────────────────────────────────────

/// Flush and unique-five-ranks tables, indexed by 13-bit rank masks.
///
/// Building the tables is the evaluator's startup cost; construct once per
/// process and share the instance across engines.
#[derive(Debug, Clone)]
pub struct HandRanks {
    flush: Box<[u32]>,
    unique5: Box<[u32]>,
}

impl Default for HandRanks {
    fn default() -> Self {
        Self::new()
    }
}

impl HandRanks {
    pub fn new() -> Self {
        let mut flush = vec![0u32; 8192].into_boxed_slice();
        let mut unique5 = vec![0u32; 8192].into_boxed_slice();

        for mask in 0u32..8192 {
            if mask.count_ones() != 5 {
                continue;
            }
            match STRAIGHTS.iter().position(|&s| s == mask) {
                Some(i) => {
                    // A-high straight tops at rank 12, the wheel at rank 3
                    let top = 12 - i as u32;
                    flush[mask as usize] = STRAIGHT_FLUSH << CATEGORY_SHIFT | top;
                    unique5[mask as usize] = STRAIGHT << CATEGORY_SHIFT | top;
                }
                None => {
                    let kickers = pack_mask(mask);
                    flush[mask as usize] = FLUSH << CATEGORY_SHIFT | kickers;
                    unique5[mask as usize] = HIGH_CARD << CATEGORY_SHIFT | kickers;
                }
            }
        }

        log::info!("Hand-rank lookup tables initialized (64KB)");
        Self { flush, unique5 }
    }

    /// Evaluate exactly five cards.
    ///
    /// 1. All same suit → flush table
    /// 2. Five distinct ranks → unique5 table (straights and high cards)
    /// 3. Otherwise classify by rank counts (pairs, trips, quads, full houses)
    #[inline]
    pub fn evaluate_5cards(&self, cards: [Card; 5]) -> u32 {
        let rank_bits = cards.iter().fold(0u32, |bits, c| bits | 1 << c.rank());
        let suit = cards[0].suit();
        let is_flush = cards[1..].iter().all(|c| c.suit() == suit);

        if is_flush {
            return self.flush[rank_bits as usize];
        }
        if rank_bits.count_ones() == 5 {
            return self.unique5[rank_bits as usize];
        }
        classify_by_counts(&cards)
    }
}

impl Evaluator for HandRanks {
    /// Best five-card score among the given cards (5 to 7 cards).
    /// Fewer than five cards score 0.
    fn score(&self, cards: &[Card]) -> u32 {
        let n = cards.len();
        if n < 5 {
            return 0;
        }
        let mut best = 0;
        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        for e in (d + 1)..n {
                            let hand = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                            best = best.max(self.evaluate_5cards(hand));
                        }
                    }
                }
            }
        }
        best
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Pack the set bits of a rank mask, highest first, 4 bits per rank.
fn pack_mask(mask: u32) -> u32 {
    (0..13)
        .rev()
        .filter(|r| mask & (1 << r) != 0)
        .fold(0, |acc, r| acc << 4 | r)
}

/// Score a hand that has at least one repeated rank.
fn classify_by_counts(cards: &[Card; 5]) -> u32 {
    let mut counts = [0u8; 13];
    for card in cards {
        counts[card.rank()] += 1;
    }

    // (count, rank) groups, largest group first, higher rank breaking ties
    let mut groups = [(0u8, 0u32); 4];
    let mut len = 0;
    for rank in (0..13).rev() {
        if counts[rank] > 0 {
            groups[len] = (counts[rank], rank as u32);
            len += 1;
        }
    }
    let groups = &mut groups[..len];
    groups.sort_by(|a, b| b.0.cmp(&a.0));

    let category = match (groups[0].0, groups.get(1).map_or(0, |g| g.0)) {
        (4, _) => QUADS,
        (3, 2) => FULL_HOUSE,
        (3, _) => TRIPS,
        (2, 2) => TWO_PAIR,
        _ => PAIR,
    };
    let tiebreak = groups.iter().fold(0, |acc, &(_, rank)| acc << 4 | rank);

    category << CATEGORY_SHIFT | tiebreak
}

// ── Tests ───────────────────────────────────────────────────────────
