//! Error types shared by every entry point of the crate.

use thiserror::Error;

/// Failure of an equity, evaluation or classification request.
///
/// All variants are raised before any simulation work starts, so a caller
/// never receives a partially computed number alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquityError {
    /// A card code could not be parsed.
    #[error("invalid card code {code:?}: {reason}")]
    Format {
        /// The offending input.
        code: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Wrong cardinality, duplicate cards or an out-of-range parameter.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Not enough undealt cards to complete the board and deal every opponent.
    #[error("not enough cards: {needed} required but only {available} undealt")]
    Capacity {
        /// Cards the request would consume.
        needed: usize,
        /// Cards left after removing hero and board.
        available: usize,
    },
}

impl EquityError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        EquityError::Validation(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EquityError>;
