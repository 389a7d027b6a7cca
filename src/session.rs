//! Caller-owned card selection.
//!
//! A `Session` holds the hero and board picks of one front end, plus the
//! opponent count, and turns them into an [`EquityRequest`] when the
//! selection is complete enough to simulate.

use serde::{Deserialize, Serialize};

use crate::api::EquityRequest;
use crate::cards::Card;
use crate::sim::{TrialPreset, MAX_OPPONENTS};

/// Maximum hero cards.
pub const MAX_HERO: usize = 2;

/// Maximum board cards.
pub const MAX_BOARD: usize = 5;

/// Opponent count of a fresh session.
pub const DEFAULT_OPPONENTS: usize = 2;

/// Which side a picked card goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    /// Picks go to the hero hand.
    #[default]
    Hero,
    /// Picks go to the board.
    Board,
}

/// Hero, board and opponent selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    hero: Vec<Card>,
    board: Vec<Card>,
    /// Cards seen by [`assign_detected`](Self::assign_detected), assigned or not.
    detected: Vec<Card>,
    mode: PickMode,
    opponents: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            hero: Vec::with_capacity(MAX_HERO),
            board: Vec::with_capacity(MAX_BOARD),
            detected: Vec::new(),
            mode: PickMode::Hero,
            opponents: DEFAULT_OPPONENTS,
        }
    }
}

impl Session {
    /// Empty session picking hero cards against two opponents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hero cards in pick order.
    pub fn hero(&self) -> &[Card] {
        &self.hero
    }

    /// Board cards in pick order.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Current pick mode.
    pub fn mode(&self) -> PickMode {
        self.mode
    }

    /// Switch the side new picks go to.
    pub fn set_mode(&mut self, mode: PickMode) {
        self.mode = mode;
    }

    /// Number of opponents.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Set the opponent count, clamped to `1..=9`.
    pub fn set_opponents(&mut self, opponents: usize) {
        self.opponents = opponents.clamp(1, MAX_OPPONENTS);
    }

    /// One more opponent, up to nine.
    pub fn increment_opponents(&mut self) {
        self.set_opponents(self.opponents + 1);
    }

    /// One fewer opponent, down to one.
    pub fn decrement_opponents(&mut self) {
        self.set_opponents(self.opponents.saturating_sub(1));
    }

    /// Check if `card` is on either side.
    pub fn contains(&self, card: Card) -> bool {
        self.hero.contains(&card) || self.board.contains(&card)
    }

    /// Pick or unpick `card` on the active side.
    ///
    /// A selected card is removed. Otherwise it is added when the side has
    /// room and the card is not on the other side. Returns whether anything
    /// changed.
    pub fn toggle(&mut self, card: Card) -> bool {
        let (side, other, cap) = match self.mode {
            PickMode::Hero => (&mut self.hero, &self.board, MAX_HERO),
            PickMode::Board => (&mut self.board, &self.hero, MAX_BOARD),
        };

        if let Some(pos) = side.iter().position(|&c| c == card) {
            side.remove(pos);
            true
        } else if side.len() < cap && !other.contains(&card) {
            side.push(card);
            true
        } else {
            false
        }
    }

    /// Take cards reported by an external recogniser.
    ///
    /// Cards not seen before fill the hero hand first, then the board. A card
    /// arriving when both sides are full is remembered but not assigned.
    pub fn assign_detected(&mut self, cards: &[Card]) {
        for &card in cards {
            if self.detected.contains(&card) || self.contains(card) {
                continue;
            }
            if self.hero.len() < MAX_HERO {
                self.hero.push(card);
            } else if self.board.len() < MAX_BOARD {
                self.board.push(card);
            }
            self.detected.push(card);
        }
    }

    /// Drop `card` from every side.
    pub fn remove(&mut self, card: Card) {
        self.hero.retain(|&c| c != card);
        self.board.retain(|&c| c != card);
        self.detected.retain(|&c| c != card);
    }

    /// Drop every card; mode and opponents are kept.
    pub fn clear(&mut self) {
        self.hero.clear();
        self.board.clear();
        self.detected.clear();
    }

    /// Check if the selection can be simulated: two hero cards and a board
    /// of 0, 3, 4 or 5 cards.
    pub fn is_ready(&self) -> bool {
        self.hero.len() == MAX_HERO && matches!(self.board.len(), 0 | 3 | 4 | 5)
    }

    /// Equity request for the current selection, if ready.
    pub fn request(&self, trials: u32) -> Option<EquityRequest> {
        if !self.is_ready() {
            return None;
        }
        Some(EquityRequest {
            hero: self.hero.iter().map(Card::to_string).collect(),
            board: self.board.iter().map(Card::to_string).collect(),
            opponents: self.opponents,
            trials,
        })
    }

    /// Request sized for recomputation on every change.
    pub fn live_request(&self) -> Option<EquityRequest> {
        self.request(TrialPreset::Live.trials())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_toggle_hero() {
        let mut session = Session::new();
        assert!(session.toggle(card("Ah")));
        assert!(session.toggle(card("Kd")));
        assert!(!session.toggle(card("Qs")), "hero is full");
        assert_eq!(session.hero(), &[card("Ah"), card("Kd")]);

        assert!(session.toggle(card("Ah")));
        assert_eq!(session.hero(), &[card("Kd")]);
    }

    #[test]
    fn test_toggle_respects_other_side() {
        let mut session = Session::new();
        session.toggle(card("Ah"));
        session.set_mode(PickMode::Board);
        assert!(!session.toggle(card("Ah")));
        assert!(session.board().is_empty());

        for code in ["2c", "3c", "4c", "5c", "6c"] {
            assert!(session.toggle(card(code)));
        }
        assert!(!session.toggle(card("7c")), "board is full");
        assert_eq!(session.board().len(), 5);

        session.set_mode(PickMode::Hero);
        assert!(!session.toggle(card("2c")));
        assert_eq!(session.hero(), &[card("Ah")]);
    }

    #[test]
    fn test_assign_detected() {
        let mut session = Session::new();
        let cards = parse_cards("Ah Kd Ah 2c 3c 4c 5c 6c 7c").unwrap();
        session.assign_detected(&cards);
        assert_eq!(session.hero(), &[card("Ah"), card("Kd")]);
        assert_eq!(session.board(), parse_cards("2c3c4c5c6c").unwrap().as_slice());

        // Already seen cards are ignored even after being removed.
        session.remove(card("6c"));
        session.assign_detected(&[card("Ah"), card("7c")]);
        assert_eq!(session.board().len(), 4);
        session.assign_detected(&[card("6c")]);
        assert_eq!(session.board().last(), Some(&card("6c")));
    }

    #[test]
    fn test_assign_detected_skips_manual_picks() {
        let mut session = Session::new();
        session.toggle(card("Ah"));
        session.assign_detected(&parse_cards("Ah Qs Jd").unwrap());
        assert_eq!(session.hero(), &[card("Ah"), card("Qs")]);
        assert_eq!(session.board(), &[card("Jd")]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut session = Session::new();
        session.assign_detected(&parse_cards("Ah Kd 2c 3c 4c").unwrap());
        session.remove(card("Kd"));
        session.remove(card("3c"));
        assert_eq!(session.hero(), &[card("Ah")]);
        assert_eq!(session.board(), &[card("2c"), card("4c")]);

        session.increment_opponents();
        session.set_mode(PickMode::Board);
        session.clear();
        assert!(session.hero().is_empty());
        assert!(session.board().is_empty());
        assert_eq!(session.opponents(), 3);
        assert_eq!(session.mode(), PickMode::Board);
    }

    #[test]
    fn test_opponent_stepper_clamped() {
        let mut session = Session::new();
        assert_eq!(session.opponents(), DEFAULT_OPPONENTS);
        for _ in 0..20 {
            session.increment_opponents();
        }
        assert_eq!(session.opponents(), 9);
        for _ in 0..20 {
            session.decrement_opponents();
        }
        assert_eq!(session.opponents(), 1);
        session.set_opponents(0);
        assert_eq!(session.opponents(), 1);
    }

    #[test]
    fn test_request_needs_complete_selection() {
        let mut session = Session::new();
        session.toggle(card("Ah"));
        assert!(session.request(1_000).is_none());

        session.toggle(card("Kd"));
        let request = session.live_request().unwrap();
        assert_eq!(request.hero, vec!["Ah".to_string(), "Kd".to_string()]);
        assert!(request.board.is_empty());
        assert_eq!(request.opponents, DEFAULT_OPPONENTS);
        assert_eq!(request.trials, TrialPreset::Live.trials());

        session.set_mode(PickMode::Board);
        session.toggle(card("2c"));
        assert!(session.request(1_000).is_none(), "one board card cannot be simulated");
        session.toggle(card("3c"));
        session.toggle(card("4c"));
        assert_eq!(session.request(1_000).unwrap().board.len(), 3);
    }

    #[test]
    fn test_request_runs() {
        let mut session = Session::new();
        session.assign_detected(&parse_cards("AsAd").unwrap());
        let request = session.request(2_000).unwrap();
        let result = crate::api::Engine::new(crate::sim::SimConfig::new().with_seed(1))
            .unwrap()
            .compute_equity(&request)
            .unwrap();
        assert_eq!(result.trials, 2_000);
    }
}
