//! Card representation.
//!
//! - `Card`: a single playing card with rank and suit
//! - `parse_cards`: parse a run of card codes such as `"AhKs"` or `"Ah Ks"`
//! - `card_mask`: 52-bit set of cards, rejecting duplicates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EquityError, Result};

// Rank values (2-14: 2-A).
/// Rank of a two.
pub const RANK_2: u8 = 2;
/// Rank of a three.
pub const RANK_3: u8 = 3;
/// Rank of a four.
pub const RANK_4: u8 = 4;
/// Rank of a five.
pub const RANK_5: u8 = 5;
/// Rank of a six.
pub const RANK_6: u8 = 6;
/// Rank of a seven.
pub const RANK_7: u8 = 7;
/// Rank of an eight.
pub const RANK_8: u8 = 8;
/// Rank of a nine.
pub const RANK_9: u8 = 9;
/// Rank of a ten.
pub const RANK_T: u8 = 10;
/// Rank of a jack.
pub const RANK_J: u8 = 11;
/// Rank of a queen.
pub const RANK_Q: u8 = 12;
/// Rank of a king.
pub const RANK_K: u8 = 13;
/// Rank of an ace, which plays high except in the wheel.
pub const RANK_A: u8 = 14;

// Suit of a card (0-3).
/// Clubs, code `c`.
pub const SUIT_CLUBS: u8 = 0;
/// Diamonds, code `d`.
pub const SUIT_DIAMONDS: u8 = 1;
/// Hearts, code `h`.
pub const SUIT_HEARTS: u8 = 2;
/// Spades, code `s`.
pub const SUIT_SPADES: u8 = 3;

/// Rank characters, indexed by `rank - 2`.
pub(crate) const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for codes.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Suit symbols for display.
const SUIT_SYMBOLS: [char; 4] = ['♣', '♦', '♥', '♠'];

/// A single playing card.
///
/// Ordered by rank, then suit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// Card index 0-51: (rank - 2) * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (2-14) and suit (0-3).
    ///
    /// # Panics
    ///
    /// Panics if `rank` is outside 2-14 or `suit` is outside 0-3. Use
    /// [`Card::parse`] for untrusted input.
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        assert!((RANK_2..=RANK_A).contains(&rank), "rank must be 2-14, got {}", rank);
        assert!(suit < 4, "suit must be 0-3, got {}", suit);
        Self { id: (rank - RANK_2) * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    ///
    /// # Panics
    ///
    /// Panics if `id` is 52 or more.
    #[inline]
    pub fn from_id(id: u8) -> Self {
        assert!(id < 52, "card id must be 0-51, got {}", id);
        Self { id }
    }

    /// Parse a card from a code like "As", "kh", "2C".
    pub fn parse(code: &str) -> Result<Self> {
        let mut chars = code.chars();
        let (r, s) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => {
                return Err(EquityError::Format {
                    code: code.to_string(),
                    reason: "expected exactly two characters",
                })
            }
        };

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == r.to_ascii_uppercase())
            .ok_or_else(|| EquityError::Format {
                code: code.to_string(),
                reason: "unknown rank",
            })?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == s.to_ascii_lowercase())
            .ok_or_else(|| EquityError::Format {
                code: code.to_string(),
                reason: "unknown suit",
            })?;

        Ok(Self::new(rank as u8 + RANK_2, suit as u8))
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (2-14: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4 + RANK_2
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask of this card.
    #[inline]
    pub fn bit(&self) -> u64 {
        1u64 << self.id
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[(self.rank() - RANK_2) as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }

    /// Render with a suit symbol, e.g. "A♠".
    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank_char(), SUIT_SYMBOLS[self.suit() as usize])
    }
}

impl FromStr for Card {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self> {
        Card::parse(s)
    }
}

impl TryFrom<String> for Card {
    type Error = EquityError;

    fn try_from(code: String) -> Result<Self> {
        Card::parse(&code)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a run of card codes like "AhKs", "Ah Ks" or "Ah,Ks".
pub fn parse_cards(s: &str) -> Result<Vec<Card>> {
    let compact: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if compact.len() % 2 != 0 {
        return Err(EquityError::Format {
            code: s.to_string(),
            reason: "odd number of characters",
        });
    }

    compact
        .chunks(2)
        .map(|pair| Card::parse(&pair.iter().collect::<String>()))
        .collect()
}

/// Parse a list of individual codes.
pub fn parse_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Card>> {
    codes.iter().map(|c| Card::parse(c.as_ref())).collect()
}

/// Build a bitmask of `cards`, failing on the first duplicate.
pub fn card_mask(cards: &[Card]) -> Result<u64> {
    let mut mask = 0u64;
    for card in cards {
        if mask & card.bit() != 0 {
            return Err(EquityError::validation(format!("duplicate card {}", card)));
        }
        mask |= card.bit();
    }
    Ok(mask)
}
