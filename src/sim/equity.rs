//! Monte Carlo equity simulation.
//!
//! Each trial completes the board and deals every opponent two cards from a
//! fresh shuffle of the undealt cards, then compares best hands. Hero wins a
//! trial when no opponent is better or equal, ties when nobody is better but
//! at least one opponent is equal, and loses otherwise.

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use super::config::{ConfigError, SimConfig};
use super::shuffle::{rng_from_seed, seed_stream};
use crate::cards::{card_mask, Card, Deck, DECK_SIZE};
use crate::error::{EquityError, Result};
use crate::eval::best_hand::best_of;

/// Most opponents a spot may have.
pub const MAX_OPPONENTS: usize = 9;

/// Win/tie/lose percentages of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// Percentage of trials won outright.
    pub win: f64,
    /// Percentage of trials split with at least one opponent.
    pub tie: f64,
    /// Percentage of trials lost.
    pub lose: f64,
    /// `win + tie / 2`.
    pub equity: f64,
    /// Trials the percentages are based on.
    pub trials: u32,
}

/// Raw outcome counts, merged by addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Trials hero won outright.
    pub wins: u32,
    /// Trials hero tied for best.
    pub ties: u32,
    /// Trials played.
    pub trials: u32,
}

impl Tally {
    /// Record one trial.
    pub fn record(&mut self, outcome: Outcome) {
        self.trials += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Lose => {}
        }
    }

    /// Trials that were neither won nor tied.
    pub fn losses(&self) -> u32 {
        self.trials - self.wins - self.ties
    }

    /// Convert counts to percentages. `trials` must be positive.
    pub fn to_result(&self) -> EquityResult {
        debug_assert!(self.trials > 0);
        let total = self.trials as f64;
        let win = self.wins as f64 / total * 100.0;
        let tie = self.ties as f64 / total * 100.0;
        let lose = self.losses() as f64 / total * 100.0;
        EquityResult {
            win,
            tie,
            lose,
            equity: win + tie * 0.5,
            trials: self.trials,
        }
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        *self = *self + other;
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), Add::add)
    }
}

/// Result of a single trial from hero's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every opponent is beaten.
    Win,
    /// Nobody beats hero, at least one opponent matches.
    Tie,
    /// Some opponent is stronger.
    Lose,
}

/// A validated simulation input: hero, known board and opponent count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    hero: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
}

impl Spot {
    /// Validate and build a spot.
    ///
    /// Checks, in order: hero has two cards, board has 0, 3, 4 or 5 cards,
    /// no card repeats, the deck can cover `2 + 5 + 2 * opponents` cards after
    /// removing the known ones, and `opponents` is within `1..=9`.
    pub fn new(hero: &[Card], board: &[Card], opponents: usize) -> Result<Self> {
        let hero: [Card; 2] = hero.try_into().map_err(|_| {
            EquityError::validation(format!("hero needs exactly 2 cards, got {}", hero.len()))
        })?;
        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(EquityError::validation(format!(
                "board must have 0, 3, 4 or 5 cards, got {}",
                board.len()
            )));
        }

        let mut known = hero.to_vec();
        known.extend_from_slice(board);
        card_mask(&known)?;

        // Saturates so an absurd opponent count still reports a capacity error.
        let needed = opponents.saturating_mul(2).saturating_add(2 + 5);
        let available = DECK_SIZE - known.len();
        if needed > available {
            return Err(EquityError::Capacity { needed, available });
        }
        if !(1..=MAX_OPPONENTS).contains(&opponents) {
            return Err(EquityError::validation(format!(
                "opponents must be between 1 and {}, got {}",
                MAX_OPPONENTS, opponents
            )));
        }

        Ok(Self {
            hero,
            board: board.to_vec(),
            opponents,
        })
    }

    /// Hero's hole cards.
    pub fn hero(&self) -> [Card; 2] {
        self.hero
    }

    /// Known board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Number of opponents.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Hero and board cards.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut known = self.hero.to_vec();
        known.extend_from_slice(&self.board);
        known
    }

    /// The undealt cards of this spot.
    pub fn working_deck(&self) -> Result<Deck> {
        Deck::without(&self.known_cards())
    }

    /// Cards consumed per trial: board completion plus opponents' hole cards.
    fn cards_per_trial(&self) -> usize {
        (5 - self.board.len()) + 2 * self.opponents
    }

    /// Play one trial from `deck`, which must be this spot's working deck.
    pub fn play_trial<R: Rng + ?Sized>(&self, deck: &mut Deck, rng: &mut R) -> Outcome {
        let known = self.board.len();
        let missing = 5 - known;
        let drawn = deck.draw(self.cards_per_trial(), rng);

        // [hole, hole, board x5]; hole slots are swapped per player.
        let mut seven = [self.hero[0]; 7];
        seven[..2].copy_from_slice(&self.hero);
        seven[2..2 + known].copy_from_slice(&self.board);
        seven[2 + known..].copy_from_slice(&drawn[..missing]);
        let hero_score = best_of(&seven);

        let mut tied = false;
        for hole in drawn[missing..].chunks_exact(2) {
            seven[..2].copy_from_slice(hole);
            match best_of(&seven).cmp(&hero_score) {
                Ordering::Greater => return Outcome::Lose,
                Ordering::Equal => tied = true,
                Ordering::Less => {}
            }
        }

        if tied {
            Outcome::Tie
        } else {
            Outcome::Win
        }
    }

    /// Play `trials` trials on one RNG stream.
    pub fn run<R: Rng + ?Sized>(&self, deck: &mut Deck, trials: u32, rng: &mut R) -> Tally {
        let mut tally = Tally::default();
        for _ in 0..trials {
            tally.record(self.play_trial(deck, rng));
        }
        tally
    }
}

fn check_trials(trials: u32) -> Result<()> {
    if trials == 0 {
        return Err(EquityError::validation("trials must be positive"));
    }
    Ok(())
}

/// Estimate hero's equity on a single RNG stream.
///
/// `board` may hold 0, 3, 4 or 5 cards; the rest of the board and every
/// opponent's hand are sampled `trials` times.
pub fn simulate_equity<R: Rng + ?Sized>(
    hero: &[Card],
    board: &[Card],
    opponents: usize,
    trials: u32,
    rng: &mut R,
) -> Result<EquityResult> {
    let spot = Spot::new(hero, board, opponents)?;
    check_trials(trials)?;

    let mut deck = spot.working_deck()?;
    Ok(spot.run(&mut deck, trials, rng).to_result())
}

/// Cooperative cancellation flag shared with a running simulation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the simulation to stop scheduling batches.
    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Relaxed);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Relaxed)
    }
}

/// Parallel simulator.
///
/// Trials are split into batches of `batch_size`; each batch runs on its own
/// `StdRng` seeded from a stream derived from the configured seed, and the
/// batch tallies are summed. A seeded simulator is deterministic regardless
/// of the number of threads.
pub struct EquitySimulator {
    config: SimConfig,
    pool: Option<rayon::ThreadPool>,
}

impl EquitySimulator {
    /// Create a simulator, building a dedicated thread pool if requested.
    pub fn new(config: SimConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let pool = match config.num_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run `op` on the configured pool, or the global one.
    pub(crate) fn install<OP, T>(&self, op: OP) -> T
    where
        OP: FnOnce() -> T + Send,
        T: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Estimate hero's equity across all worker threads.
    pub fn simulate(
        &self,
        hero: &[Card],
        board: &[Card],
        opponents: usize,
        trials: u32,
    ) -> Result<EquityResult> {
        self.simulate_with_cancel(hero, board, opponents, trials, &CancelToken::new())
    }

    /// Like [`simulate`](Self::simulate), but stops scheduling new batches
    /// once `cancel` is set and returns the partial tally. The first batch
    /// always completes, so the result is never empty.
    pub fn simulate_with_cancel(
        &self,
        hero: &[Card],
        board: &[Card],
        opponents: usize,
        trials: u32,
        cancel: &CancelToken,
    ) -> Result<EquityResult> {
        let spot = Spot::new(hero, board, opponents)?;
        check_trials(trials)?;

        debug!(
            "simulating {:?} on [{}] vs {} opponents, {} trials",
            spot.hero(),
            spot.board().iter().map(|c| c.to_string()).collect::<String>(),
            opponents,
            trials
        );

        let mut master = rng_from_seed(self.config.seed);
        let tally = self.run_batches(&spot, trials, &mut master, cancel)?;

        if tally.trials < trials {
            warn!(
                "simulation cancelled after {} of {} trials",
                tally.trials, trials
            );
        }
        Ok(tally.to_result())
    }

    /// Run `trials` trials of `spot` in parallel batches seeded from `master`.
    pub(crate) fn run_batches<R: Rng + ?Sized>(
        &self,
        spot: &Spot,
        trials: u32,
        master: &mut R,
        cancel: &CancelToken,
    ) -> Result<Tally> {
        let deck = spot.working_deck()?;
        let batch_size = u32::try_from(self.config.batch_size).unwrap_or(u32::MAX);
        let num_batches = trials.div_ceil(batch_size);
        let seeds = seed_stream(master, num_batches as usize);

        let tally = self.install(|| {
            seeds
                .par_iter()
                .enumerate()
                .map(|(i, &seed)| {
                    if i > 0 && cancel.is_cancelled() {
                        return Tally::default();
                    }
                    let start = i as u32 * batch_size;
                    let count = batch_size.min(trials - start);
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut deck = deck.clone();
                    let tally = spot.run(&mut deck, count, &mut rng);
                    trace!("batch {} done: {:?}", i, tally);
                    tally
                })
                .reduce(Tally::default, Add::add)
        });
        Ok(tally)
    }
}
