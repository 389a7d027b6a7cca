//! Hand ranking.
//!
//! - `hand_eval`: scores exactly five cards into a comparable `HandScore`
//! - `best_hand`: picks the strongest five-card subset of five to seven cards

pub mod best_hand;
pub mod hand_eval;

pub use best_hand::{evaluate_best, FiveSubsets};
pub use hand_eval::{evaluate_5, HandCategory, HandScore};
