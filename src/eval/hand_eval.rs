//! Poker hand evaluation.
//!
//! Scores exactly five cards into a `HandScore`: a category plus a tiebreak
//! that orders hands within the category. Kickers are packed in base 15, which
//! is larger than any rank value, so a higher position always dominates every
//! lower one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{card_mask, Card};
use crate::error::{EquityError, Result};

/// Tiebreak radix; must exceed the largest rank (14).
const BASE: u32 = 15;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// Nothing better than the highest card.
    HighCard = 0,
    /// Two cards of one rank.
    OnePair = 1,
    /// Two cards each of two ranks.
    TwoPair = 2,
    /// Three cards of one rank.
    ThreeOfAKind = 3,
    /// Five consecutive ranks, the wheel included.
    Straight = 4,
    /// Five cards of one suit.
    Flush = 5,
    /// Three of one rank and two of another.
    FullHouse = 6,
    /// Four cards of one rank.
    FourOfAKind = 7,
    /// A straight in a single suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// Numeric category (0-8).
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable strength of a five-card hand.
///
/// Ordered by category, then tiebreak. Tiebreaks are only meaningful between
/// hands of the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandScore {
    /// Hand category.
    pub category: HandCategory,
    /// Base-15 kicker encoding within the category.
    pub tiebreak: u32,
}

impl HandScore {
    /// Below every real hand.
    pub(crate) const LOWEST: HandScore = HandScore {
        category: HandCategory::HighCard,
        tiebreak: 0,
    };

    fn new(category: HandCategory, tiebreak: u32) -> Self {
        Self { category, tiebreak }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.tiebreak)
    }
}

/// Evaluate exactly five distinct cards.
pub fn evaluate_5(cards: &[Card]) -> Result<HandScore> {
    let hand: &[Card; 5] = cards.try_into().map_err(|_| {
        EquityError::validation(format!("expected 5 cards, got {}", cards.len()))
    })?;
    card_mask(cards)?;
    Ok(score_5(hand))
}

/// Score five cards already known to be distinct.
pub(crate) fn score_5(cards: &[Card; 5]) -> HandScore {
    let mut rank_counts = [0u8; 15];
    let mut rank_bits = 0u16; // bit r set when rank r is present
    let first_suit = cards[0].suit();
    let mut is_flush = true;

    for card in cards {
        rank_counts[card.rank() as usize] += 1;
        rank_bits |= 1 << card.rank();
        is_flush &= card.suit() == first_suit;
    }

    let straight_high = find_straight(rank_bits);

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandScore::new(HandCategory::StraightFlush, high as u32);
    }

    // Ranks grouped by multiplicity, largest group first, then by rank.
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for rank in (2..=14u8).rev() {
        let count = rank_counts[rank as usize];
        if count > 0 {
            groups[n] = (count, rank);
            n += 1;
        }
    }
    let groups = &mut groups[..n];
    groups.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let tiebreak = weigh(groups.iter().map(|&(_, r)| r));

    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => HandCategory::FourOfAKind,
        (3, Some(2)) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, Some(2)) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight_high) {
        (HandCategory::Straight, Some(high)) => HandScore::new(category, high as u32),
        _ => HandScore::new(category, tiebreak),
    }
}

/// Pack ranks, most significant first, into a base-15 number.
fn weigh(ranks: impl IntoIterator<Item = u8>) -> u32 {
    ranks.into_iter().fold(0, |acc, r| acc * BASE + r as u32)
}

/// High card of the straight formed by five distinct ranks, if any.
/// The wheel (A-2-3-4-5) plays as five-high.
fn find_straight(rank_bits: u16) -> Option<u8> {
    const WHEEL: u16 = (1 << 14) | 0b11_1100;

    if rank_bits == WHEEL {
        return Some(5);
    }
    if rank_bits.count_ones() != 5 {
        return None;
    }
    let low = rank_bits.trailing_zeros() as u8;
    if rank_bits >> low == 0b1_1111 {
        Some(low + 4)
    } else {
        None
    }
}
