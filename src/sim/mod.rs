//! Monte Carlo simulation.
//!
//! - `shuffle`: the RNG boundary (shuffles, partial draws, seed streams)
//! - `config`: simulator configuration and trial presets
//! - `equity`: win/tie/lose estimation, sequential and parallel
//! - `texture`: flop sampling bucketed by board texture

pub mod config;
pub mod equity;
pub mod shuffle;
pub mod texture;

pub use config::{
    ConfigError, SimConfig, TrialPreset, DEFAULT_FLOP_SAMPLES, DEFAULT_TRIALS_PER_FLOP,
};
pub use equity::{
    simulate_equity, CancelToken, EquityResult, EquitySimulator, Outcome, Spot, Tally,
    MAX_OPPONENTS,
};
pub use shuffle::{draw, rng_from_seed, seed_stream, shuffle, shuffled};
pub use texture::{batch_analyze, BoardTexture, TextureReport, TextureStats};
