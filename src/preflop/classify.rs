//! Starting-hand classes.
//!
//! Two hole cards collapse to one of 169 classes:
//! - 13 pairs (AA, KK, ..., 22)
//! - 78 suited hands (AKs, AQs, ..., 32s)
//! - 78 offsuit hands (AKo, AQo, ..., 32o)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::card::{RANK_2, RANK_CHARS};
use crate::cards::{card_mask, Card};
use crate::error::{EquityError, Result};

/// A starting-hand class such as "AKs", "QQ" or "72o".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandClass {
    /// Higher rank (2-14)
    pub rank1: u8,
    /// Lower or equal rank (2-14)
    pub rank2: u8,
    /// Whether suited; always false for pairs
    pub suited: bool,
}

impl HandClass {
    /// Class of two hole cards, in either order.
    pub fn from_cards(hero: &[Card]) -> Result<Self> {
        let [a, b]: [Card; 2] = hero.try_into().map_err(|_| {
            EquityError::validation(format!("hero needs exactly 2 cards, got {}", hero.len()))
        })?;
        card_mask(hero)?;

        let rank1 = a.rank().max(b.rank());
        let rank2 = a.rank().min(b.rank());
        Ok(Self {
            rank1,
            rank2,
            suited: rank1 != rank2 && a.suit() == b.suit(),
        })
    }

    /// Check if this is a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.rank1 == self.rank2
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r1 = RANK_CHARS[(self.rank1 - RANK_2) as usize];
        let r2 = RANK_CHARS[(self.rank2 - RANK_2) as usize];
        if self.is_pair() {
            write!(f, "{}{}", r1, r2)
        } else {
            let suffix = if self.suited { 's' } else { 'o' };
            write!(f, "{}{}{}", r1, r2, suffix)
        }
    }
}

/// Category label of two hole cards: "AA", "AKs" or "AKo".
pub fn classify(hero: &[Card]) -> Result<String> {
    HandClass::from_cards(hero).map(|class| class.to_string())
}
