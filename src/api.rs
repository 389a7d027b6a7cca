//! String-code entry points.
//!
//! Everything here takes card codes such as `"Ah"` or `"td"` and returns
//! serde-serialisable values, so a front end can exchange requests and
//! results as JSON. The free functions run on one entropy-seeded stream;
//! [`Engine`] runs the same requests on a configured parallel simulator.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::{parse_codes, Card};
use crate::error::Result;
use crate::preflop::{gto_advice, GtoAdvice};
use crate::sim::{
    batch_analyze, rng_from_seed, simulate_equity, CancelToken, ConfigError, EquityResult,
    EquitySimulator, SimConfig, TextureReport, TrialPreset, DEFAULT_FLOP_SAMPLES,
    DEFAULT_TRIALS_PER_FLOP,
};

fn default_opponents() -> usize {
    1
}

fn default_trials() -> u32 {
    TrialPreset::Manual.trials()
}

fn default_flop_samples() -> u32 {
    DEFAULT_FLOP_SAMPLES
}

fn default_trials_per_flop() -> u32 {
    DEFAULT_TRIALS_PER_FLOP
}

/// An equity request in card codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityRequest {
    /// Hero's two hole cards.
    pub hero: Vec<String>,
    /// Known board cards: 0, 3, 4 or 5.
    #[serde(default)]
    pub board: Vec<String>,
    /// Number of random opponents.
    #[serde(default = "default_opponents")]
    pub opponents: usize,
    /// Monte Carlo trials.
    #[serde(default = "default_trials")]
    pub trials: u32,
}

impl EquityRequest {
    /// Parse the codes into cards.
    pub fn cards(&self) -> Result<(Vec<Card>, Vec<Card>)> {
        Ok((parse_codes(&self.hero)?, parse_codes(&self.board)?))
    }
}

/// A texture batch or hand analysis request in card codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Hero's two hole cards.
    pub hero: Vec<String>,
    /// Number of random opponents.
    #[serde(default = "default_opponents")]
    pub opponents: usize,
    /// Flops to sample.
    #[serde(default = "default_flop_samples")]
    pub flop_samples: u32,
    /// Trials per sampled flop.
    #[serde(default = "default_trials_per_flop")]
    pub trials_per_flop: u32,
}

/// Preflop equity, table advice and flop textures for one hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandAnalysis {
    /// Equity before the flop.
    pub preflop: EquityResult,
    /// Category, ranking and suggested action.
    pub advice: GtoAdvice,
    /// Average equity per flop texture.
    pub textures: TextureReport,
}

/// Estimate hero's equity from card codes.
pub fn compute_equity<S: AsRef<str>>(
    hero: &[S],
    board: &[S],
    opponents: usize,
    trials: u32,
) -> Result<EquityResult> {
    let hero = parse_codes(hero)?;
    let board = parse_codes(board)?;
    simulate_equity(&hero, &board, opponents, trials, &mut rng_from_seed(None))
}

/// Category, ranking and action for two hole-card codes.
pub fn classify_hand<S: AsRef<str>>(hero: &[S]) -> Result<GtoAdvice> {
    gto_advice(&parse_codes(hero)?)
}

/// Average equity per flop texture from card codes.
pub fn compute_board_texture_batch<S: AsRef<str>>(
    hero: &[S],
    opponents: usize,
    flop_samples: u32,
    trials_per_flop: u32,
) -> Result<TextureReport> {
    let hero = parse_codes(hero)?;
    batch_analyze(
        &hero,
        opponents,
        flop_samples,
        trials_per_flop,
        &mut rng_from_seed(None),
    )
}

/// Preflop equity, advice and texture report in one call.
pub fn analyze_hand<S: AsRef<str>>(
    hero: &[S],
    opponents: usize,
    flop_samples: u32,
    trials_per_flop: u32,
) -> Result<HandAnalysis> {
    let hero = parse_codes(hero)?;
    let advice = gto_advice(&hero)?;
    let mut rng = rng_from_seed(None);
    let preflop = simulate_equity(&hero, &[], opponents, TrialPreset::Preflop.trials(), &mut rng)?;
    let textures = batch_analyze(&hero, opponents, flop_samples, trials_per_flop, &mut rng)?;
    Ok(HandAnalysis {
        preflop,
        advice,
        textures,
    })
}

/// Request handler backed by a parallel, optionally seeded simulator.
pub struct Engine {
    sim: EquitySimulator,
}

impl Engine {
    /// Create an engine from a simulator configuration.
    pub fn new(config: SimConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            sim: EquitySimulator::new(config)?,
        })
    }

    /// The underlying simulator.
    pub fn simulator(&self) -> &EquitySimulator {
        &self.sim
    }

    /// Run an equity request.
    pub fn compute_equity(&self, request: &EquityRequest) -> Result<EquityResult> {
        self.compute_equity_with_cancel(request, &CancelToken::new())
    }

    /// Run an equity request that may be cancelled part way.
    pub fn compute_equity_with_cancel(
        &self,
        request: &EquityRequest,
        cancel: &CancelToken,
    ) -> Result<EquityResult> {
        let (hero, board) = request.cards()?;
        self.sim
            .simulate_with_cancel(&hero, &board, request.opponents, request.trials, cancel)
    }

    /// Classify two hole-card codes.
    pub fn classify_hand<S: AsRef<str>>(&self, hero: &[S]) -> Result<GtoAdvice> {
        classify_hand(hero)
    }

    /// Run a texture batch request.
    pub fn compute_board_texture_batch(&self, request: &BatchRequest) -> Result<TextureReport> {
        self.compute_board_texture_batch_with_progress(request, || {})
    }

    /// Run a texture batch request, calling `progress` after every flop.
    pub fn compute_board_texture_batch_with_progress<F>(
        &self,
        request: &BatchRequest,
        progress: F,
    ) -> Result<TextureReport>
    where
        F: Fn() + Sync,
    {
        let hero = parse_codes(&request.hero)?;
        self.sim.batch_analyze_with_progress(
            &hero,
            request.opponents,
            request.flop_samples,
            request.trials_per_flop,
            progress,
        )
    }

    /// Preflop equity, advice and texture report for a batch request.
    pub fn analyze_hand(&self, request: &BatchRequest) -> Result<HandAnalysis> {
        self.analyze_hand_with_progress(request, || {})
    }

    /// Like [`analyze_hand`](Self::analyze_hand), reporting texture progress.
    pub fn analyze_hand_with_progress<F>(
        &self,
        request: &BatchRequest,
        progress: F,
    ) -> Result<HandAnalysis>
    where
        F: Fn() + Sync,
    {
        let hero = parse_codes(&request.hero)?;
        let advice = gto_advice(&hero)?;
        debug!("analyzing {} vs {} opponents", advice.category, request.opponents);

        let preflop = self.sim.simulate(
            &hero,
            &[],
            request.opponents,
            TrialPreset::Preflop.trials(),
        )?;
        let textures = self.compute_board_texture_batch_with_progress(request, progress)?;
        Ok(HandAnalysis {
            preflop,
            advice,
            textures,
        })
    }
}
