//! The 52-card deck and working decks with known cards removed.

use rand::Rng;
use std::fmt;

use super::card::{card_mask, Card};
use crate::error::{EquityError, Result};
use crate::sim::shuffle;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// All 52 cards in id order.
pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE as u8).map(Card::from_id).collect()
}

/// The full deck minus `used`.
///
/// Fails if `used` holds more than 52 entries or repeats a card.
pub fn remaining_deck(used: &[Card]) -> Result<Vec<Card>> {
    if used.len() > DECK_SIZE {
        return Err(EquityError::validation(format!(
            "{} used cards exceed the {}-card deck",
            used.len(),
            DECK_SIZE
        )));
    }
    let dead = card_mask(used)?;
    Ok((0..DECK_SIZE as u8)
        .map(Card::from_id)
        .filter(|c| dead & c.bit() == 0)
        .collect())
}

/// A working deck: the cards still available for dealing.
///
/// Every draw is taken from a fresh uniform shuffle of all live cards, so the
/// same deck can be reused across independent trials.
#[derive(Clone)]
pub struct Deck {
    /// Live cards; order is scratch space for shuffling.
    cards: Vec<Card>,
    /// Bitmask of removed cards.
    dead_mask: u64,
}

impl Deck {
    /// Create a full deck.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            dead_mask: 0,
        }
    }

    /// Create a deck with specific cards removed.
    pub fn without(dead_cards: &[Card]) -> Result<Self> {
        let cards = remaining_deck(dead_cards)?;
        let dead_mask = card_mask(dead_cards)?;
        Ok(Self { cards, dead_mask })
    }

    /// Shuffle the live cards in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle::shuffle(&mut self.cards, rng);
    }

    /// Draw `n` cards from the front of a fresh random permutation.
    ///
    /// The returned cards stay in the deck; the next call reshuffles.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> &[Card] {
        debug_assert!(n <= self.cards.len());
        shuffle::draw(&mut self.cards, n, rng)
    }

    /// Number of live cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards remain.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if a card was removed from this deck.
    pub fn is_dead(&self, card: Card) -> bool {
        self.dead_mask & card.bit() != 0
    }

    /// Live cards in their current order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::parse_cards;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_full_deck() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let unique: FxHashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_remaining_deck() {
        for n in [0usize, 1, 2, 5, 7, 20, 52] {
            let used: Vec<Card> = full_deck().into_iter().take(n).collect();
            let rest = remaining_deck(&used).unwrap();
            assert_eq!(rest.len(), 52 - n);
            assert!(rest.iter().all(|c| !used.contains(c)));
            let unique: FxHashSet<Card> = rest.iter().copied().collect();
            assert_eq!(unique.len(), rest.len());
        }
    }

    #[test]
    fn test_remaining_deck_rejects_bad_input() {
        let dup = parse_cards("AsAs").unwrap();
        assert!(matches!(remaining_deck(&dup), Err(EquityError::Validation(_))));

        let mut too_many = full_deck();
        too_many.push(Card::from_id(0));
        assert!(matches!(remaining_deck(&too_many), Err(EquityError::Validation(_))));
    }

    #[test]
    fn test_deck_without() {
        let dead = parse_cards("AsAh").unwrap();
        let deck = Deck::without(&dead).unwrap();
        assert_eq!(deck.len(), 50);
        assert!(deck.is_dead(dead[0]));
        assert!(!deck.cards().contains(&dead[1]));
    }

    #[test]
    fn test_deck_draw() {
        let dead = parse_cards("AsAhKd").unwrap();
        let mut deck = Deck::without(&dead).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let drawn = deck.draw(9, &mut rng).to_vec();
            assert_eq!(drawn.len(), 9);
            assert!(drawn.iter().all(|c| !dead.contains(c)));
            let unique: FxHashSet<Card> = drawn.iter().copied().collect();
            assert_eq!(unique.len(), 9);
        }
        assert_eq!(deck.len(), 49);
    }
}
