//! Best five-card hand out of five to seven cards.

use super::hand_eval::{score_5, HandScore};
use crate::cards::{card_mask, Card};
use crate::error::{EquityError, Result};

/// Iterator over every 5-element index subset of `0..n`, in lexicographic
/// order, without recursion.
///
/// Yields C(n, 5) subsets: 1 for n = 5, 6 for n = 6, 21 for n = 7.
#[derive(Debug, Clone)]
pub struct FiveSubsets {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveSubsets {
    /// Subsets of `0..n`. Empty when `n < 5`.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            indices: [0, 1, 2, 3, 4],
            done: n < 5,
        }
    }
}

impl Iterator for FiveSubsets {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices;

        // Advance the rightmost index that still has room, reset the rest.
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}

/// Evaluate 5-7 distinct cards, returning the strongest 5-card score.
pub fn evaluate_best(cards: &[Card]) -> Result<HandScore> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EquityError::validation(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    card_mask(cards)?;
    Ok(best_of(cards))
}

/// Best score over all 5-card subsets; `cards` must be 5-7 distinct cards.
pub(crate) fn best_of(cards: &[Card]) -> HandScore {
    debug_assert!((5..=7).contains(&cards.len()));
    FiveSubsets::new(cards.len())
        .map(|[a, b, c, d, e]| score_5(&[cards[a], cards[b], cards[c], cards[d], cards[e]]))
        .fold(HandScore::LOWEST, std::cmp::max)
}
