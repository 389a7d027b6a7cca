//! Cards and decks.
//!
//! - `card`: card identity, two-character codes and parsing
//! - `deck`: the full deck and working decks with dead cards removed

pub mod card;
pub mod deck;

pub use card::{card_mask, parse_cards, parse_codes, Card};
pub use deck::{full_deck, remaining_deck, Deck, DECK_SIZE};
