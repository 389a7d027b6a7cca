//! Configuration options for the equity simulator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for `EquitySimulator`.
///
/// # Example
/// ```
/// use poker_equity::sim::SimConfig;
///
/// let config = SimConfig::default().with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Random seed for reproducibility.
    ///
    /// With a seed, the same request always yields the same result, whatever
    /// the thread count. If `None`, a fresh entropy seed is used per call.
    pub seed: Option<u64>,

    /// Number of worker threads.
    ///
    /// Set to `None` to use rayon's global pool (all available cores).
    pub num_threads: Option<usize>,

    /// Trials per parallel batch, between 1 and `u32::MAX`.
    ///
    /// Each batch owns one RNG stream. Smaller batches cancel faster and
    /// balance better; larger ones amortise scheduling overhead.
    pub batch_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            num_threads: None,
            batch_size: 1000,
        }
    }
}

impl SimConfig {
    /// Create a new SimConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set trials per batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 || u32::try_from(self.batch_size).is_err() {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }
}

/// Errors that can occur when validating simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Batch size must fit a trial count.
    #[error("batch size must be between 1 and {}", u32::MAX)]
    InvalidBatchSize,
    /// Thread count must be positive when set.
    #[error("thread count must be at least 1")]
    InvalidThreads,
    /// The dedicated thread pool could not be started.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Trial counts for the ways callers use the simulator.
///
/// Live overlays favour latency; on-demand calculations favour precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPreset {
    /// Recomputed on every card change.
    Live,
    /// Explicit "calculate" request.
    Manual,
    /// Preflop headline number of a hand analysis.
    Preflop,
}

impl TrialPreset {
    /// Number of trials for this preset.
    pub fn trials(&self) -> u32 {
        match self {
            TrialPreset::Live => 5_000,
            TrialPreset::Manual => 10_000,
            TrialPreset::Preflop => 8_000,
        }
    }
}

/// Default number of sampled flops for a texture batch.
pub const DEFAULT_FLOP_SAMPLES: u32 = 200;

/// Default trials per sampled flop for a texture batch.
pub const DEFAULT_TRIALS_PER_FLOP: u32 = 100;
