//! # Poker Equity
//!
//! Monte Carlo equity estimation, hand ranking and preflop classification
//! for Texas hold'em.
//!
//! ## Features
//!
//! - **Hand Evaluation**: exact 5-card scores and best-of-seven selection
//! - **Equity Simulation**: win/tie/lose against 1-9 random opponents, on one
//!   injected RNG stream or split across rayon workers
//! - **Preflop Advice**: 169 hand classes with a static strength table
//! - **Board Textures**: flop sampling bucketed by how the flop hits the hand
//!
//! ## Quick Start
//!
//! ```
//! use poker_equity::cards::parse_cards;
//! use poker_equity::sim::{EquitySimulator, SimConfig};
//!
//! let sim = EquitySimulator::new(SimConfig::default().with_seed(42)).unwrap();
//! let hero = parse_cards("AhAs").unwrap();
//! let result = sim.simulate(&hero, &[], 1, 10_000).unwrap();
//! assert!(result.equity > 80.0);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: cards, codes and decks
//! - [`eval`]: hand evaluator and best-hand selector
//! - [`sim`]: shuffler, equity simulator and texture batches
//! - [`preflop`]: hand classes and table advice
//! - [`api`]: string-code entry points and JSON request types
//! - [`session`]: caller-owned card selection
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────┐     ┌───────────────────────────┐
//!   │     api / session         │     │         preflop           │
//!   │  card codes, requests     │────▶│  HandClass, GTO table     │
//!   └───────────────────────────┘     └───────────────────────────┘
//!                 │
//!                 ▼
//!   ┌───────────────────────────────────────────────────────────┐
//!   │                          sim                              │
//!   │  EquitySimulator (rayon batches)    texture batches       │
//!   │  Spot / Tally                       shuffle (RNG boundary)│
//!   └───────────────────────────────────────────────────────────┘
//!                 │
//!                 ▼
//!   ┌───────────────────────────┐     ┌───────────────────────────┐
//!   │          eval             │────▶│          cards            │
//!   │  evaluate_5, best of 7    │     │  Card, Deck, codes        │
//!   └───────────────────────────┘     └───────────────────────────┘
//! ```

#![warn(missing_docs)]

/// String-code entry points.
pub mod api;

/// Cards, codes and decks.
pub mod cards;

/// Error taxonomy.
pub mod error;

/// Hand ranking.
pub mod eval;

/// Preflop classification.
pub mod preflop;

/// Caller-owned selection state.
pub mod session;

/// Monte Carlo simulation.
pub mod sim;

// Re-export commonly used types at crate root for convenience
pub use cards::{parse_cards, Card};
pub use error::{EquityError, Result};
pub use eval::{evaluate_5, evaluate_best, HandCategory, HandScore};
pub use preflop::{classify, gto_advice, Action, GtoAdvice};
pub use sim::{
    batch_analyze, simulate_equity, EquityResult, EquitySimulator, SimConfig, TextureReport,
};
