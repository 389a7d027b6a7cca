//! Preflop hand classification.
//!
//! - `classify`: starting-hand classes and their labels
//! - `gto`: the static strength table and suggested actions

pub mod classify;
pub mod gto;

pub use classify::{classify, HandClass};
pub use gto::{gto_advice, ranking, Action, GtoAdvice, UNRANKED};
