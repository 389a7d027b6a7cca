//! Board-texture batch analysis.
//!
//! Samples random flops for a fixed hero hand, buckets each flop by how it
//! connects with the hand, and averages hero's equity per bucket.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::equity::{EquitySimulator, Spot};
use super::shuffle::{draw, rng_from_seed, seed_stream};
use crate::cards::{remaining_deck, Card};
use crate::error::{EquityError, Result};

/// How a flop connects with the hero hand.
///
/// Variants are listed in classification precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoardTexture {
    /// Flop pairs hero's higher card.
    #[serde(rename = "Top Pair")]
    TopPair,
    /// Flop pairs hero's lower card.
    #[serde(rename = "Low Pair")]
    LowPair,
    /// Two or more flop cards share a suit with a hero card.
    #[serde(rename = "Flush Draw")]
    FlushDraw,
    /// Four of the five ranks fit inside a five-rank window.
    #[serde(rename = "Straight Draw")]
    StraightDraw,
    /// None of the above.
    #[serde(rename = "Dry Board")]
    DryBoard,
}

impl BoardTexture {
    /// All textures in precedence order.
    pub const ALL: [BoardTexture; 5] = [
        BoardTexture::TopPair,
        BoardTexture::LowPair,
        BoardTexture::FlushDraw,
        BoardTexture::StraightDraw,
        BoardTexture::DryBoard,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            BoardTexture::TopPair => "Top Pair",
            BoardTexture::LowPair => "Low Pair",
            BoardTexture::FlushDraw => "Flush Draw",
            BoardTexture::StraightDraw => "Straight Draw",
            BoardTexture::DryBoard => "Dry Board",
        }
    }

    /// Classify `flop` against `hero`.
    pub fn classify(hero: [Card; 2], flop: &[Card; 3]) -> Self {
        let high = hero[0].rank().max(hero[1].rank());
        let low = hero[0].rank().min(hero[1].rank());

        if flop.iter().any(|c| c.rank() == high) {
            return BoardTexture::TopPair;
        }
        if flop.iter().any(|c| c.rank() == low) {
            return BoardTexture::LowPair;
        }

        let flush_draw = hero
            .iter()
            .any(|h| flop.iter().filter(|c| c.suit() == h.suit()).count() >= 2);
        if flush_draw {
            return BoardTexture::FlushDraw;
        }

        let mut ranks = [flop[0].rank(), flop[1].rank(), flop[2].rank(), high, low];
        ranks.sort_unstable();
        if ranks.windows(4).any(|w| w[3] - w[0] <= 4) {
            return BoardTexture::StraightDraw;
        }

        BoardTexture::DryBoard
    }
}

impl fmt::Display for BoardTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Average equity of the flops that landed in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureStats {
    /// Mean equity percentage.
    pub avg: f64,
    /// Number of sampled flops.
    pub count: u32,
}

/// Per-texture averages; textures with no samples are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureReport {
    buckets: FxHashMap<BoardTexture, TextureStats>,
}

impl TextureReport {
    /// Build from one `(texture, equity)` entry per sampled flop.
    pub fn from_samples(samples: &[(BoardTexture, f64)]) -> Self {
        let mut sums: FxHashMap<BoardTexture, (f64, u32)> = FxHashMap::default();
        for &(texture, equity) in samples {
            let entry = sums.entry(texture).or_insert((0.0, 0));
            entry.0 += equity;
            entry.1 += 1;
        }

        let buckets = sums
            .into_iter()
            .map(|(texture, (sum, count))| {
                (
                    texture,
                    TextureStats {
                        avg: sum / count as f64,
                        count,
                    },
                )
            })
            .collect();
        Self { buckets }
    }

    /// Stats for one texture, if any flop landed there.
    pub fn get(&self, texture: BoardTexture) -> Option<&TextureStats> {
        self.buckets.get(&texture)
    }

    /// Non-empty buckets in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (BoardTexture, &TextureStats)> + '_ {
        BoardTexture::ALL
            .into_iter()
            .filter_map(move |t| self.buckets.get(&t).map(|s| (t, s)))
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no flops were recorded.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total sampled flops across buckets.
    pub fn total_samples(&self) -> u32 {
        self.buckets.values().map(|s| s.count).sum()
    }
}

/// Validate a batch request and return the preflop spot for `hero`.
fn check_batch(hero: &[Card], opponents: usize, flop_samples: u32, trials_per_flop: u32) -> Result<Spot> {
    let spot = Spot::new(hero, &[], opponents)?;
    if flop_samples == 0 {
        return Err(EquityError::validation("flop samples must be positive"));
    }
    if trials_per_flop == 0 {
        return Err(EquityError::validation("trials per flop must be positive"));
    }
    Ok(spot)
}

/// Draw `n` flops from the cards hero does not hold.
fn sample_flops<R: Rng + ?Sized>(hero: [Card; 2], n: u32, rng: &mut R) -> Result<Vec<[Card; 3]>> {
    let mut deck = remaining_deck(&hero)?;
    Ok((0..n)
        .map(|_| {
            let drawn = draw(&mut deck, 3, rng);
            [drawn[0], drawn[1], drawn[2]]
        })
        .collect())
}

/// Equity of `hero` on one flop.
fn flop_equity<R: Rng + ?Sized>(
    hero: [Card; 2],
    flop: &[Card; 3],
    opponents: usize,
    trials: u32,
    rng: &mut R,
) -> Result<(BoardTexture, f64)> {
    let spot = Spot::new(&hero, flop, opponents)?;
    let mut deck = spot.working_deck()?;
    let equity = spot.run(&mut deck, trials, rng).to_result().equity;
    Ok((BoardTexture::classify(hero, flop), equity))
}

/// Sample `flop_samples` flops and average hero's equity per texture, on a
/// single RNG stream.
pub fn batch_analyze<R: Rng + ?Sized>(
    hero: &[Card],
    opponents: usize,
    flop_samples: u32,
    trials_per_flop: u32,
    rng: &mut R,
) -> Result<TextureReport> {
    let spot = check_batch(hero, opponents, flop_samples, trials_per_flop)?;
    let hero = spot.hero();

    let flops = sample_flops(hero, flop_samples, rng)?;
    let samples = flops
        .iter()
        .map(|flop| flop_equity(hero, flop, opponents, trials_per_flop, rng))
        .collect::<Result<Vec<_>>>()?;

    Ok(TextureReport::from_samples(&samples))
}

impl EquitySimulator {
    /// Parallel texture batch: flops are sampled up front from the master
    /// seed, then each flop is simulated on its own RNG stream.
    pub fn batch_analyze(
        &self,
        hero: &[Card],
        opponents: usize,
        flop_samples: u32,
        trials_per_flop: u32,
    ) -> Result<TextureReport> {
        self.batch_analyze_with_progress(hero, opponents, flop_samples, trials_per_flop, || {})
    }

    /// Like [`batch_analyze`](Self::batch_analyze), calling `progress` once
    /// per finished flop.
    pub fn batch_analyze_with_progress<F>(
        &self,
        hero: &[Card],
        opponents: usize,
        flop_samples: u32,
        trials_per_flop: u32,
        progress: F,
    ) -> Result<TextureReport>
    where
        F: Fn() + Sync,
    {
        let spot = check_batch(hero, opponents, flop_samples, trials_per_flop)?;
        let hero = spot.hero();

        let mut master = rng_from_seed(self.config().seed);
        let flops = sample_flops(hero, flop_samples, &mut master)?;
        let seeds = seed_stream(&mut master, flops.len());

        let samples = self.install(|| {
            flops
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(flop, &seed)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let sample = flop_equity(hero, flop, opponents, trials_per_flop, &mut rng);
                    progress();
                    sample
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let report = TextureReport::from_samples(&samples);
        for (texture, stats) in report.iter() {
            info!("{:<16}{:>6.1}%  ({} flops)", texture, stats.avg, stats.count);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::sim::config::SimConfig;

    fn hero(s: &str) -> [Card; 2] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1]]
    }

    fn flop(s: &str) -> [Card; 3] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1], cards[2]]
    }

    #[test]
    fn test_classify_precedence() {
        let h = hero("AhKh");
        assert_eq!(BoardTexture::classify(h, &flop("Ac7h2h")), BoardTexture::TopPair);
        assert_eq!(BoardTexture::classify(h, &flop("Kc7h2h")), BoardTexture::LowPair);
        assert_eq!(BoardTexture::classify(h, &flop("Qh7h2c")), BoardTexture::FlushDraw);
        assert_eq!(BoardTexture::classify(h, &flop("QcJd2s")), BoardTexture::StraightDraw);
        assert_eq!(BoardTexture::classify(h, &flop("7c4d2s")), BoardTexture::DryBoard);
    }

    #[test]
    fn test_classify_pocket_pair() {
        let h = hero("8s8d");
        assert_eq!(BoardTexture::classify(h, &flop("8c3h2d")), BoardTexture::TopPair);
        assert_eq!(BoardTexture::classify(h, &flop("Kd3d2c")), BoardTexture::FlushDraw);
        assert_eq!(BoardTexture::classify(h, &flop("Kc7h6h")), BoardTexture::StraightDraw);
        assert_eq!(BoardTexture::classify(h, &flop("AcKh2h")), BoardTexture::DryBoard);
    }

    #[test]
    fn test_classify_card_order_irrelevant() {
        let f = flop("Qh7h2c");
        assert_eq!(
            BoardTexture::classify(hero("AhKh"), &f),
            BoardTexture::classify(hero("KhAh"), &f)
        );
    }

    #[test]
    fn test_report_from_samples() {
        let report = TextureReport::from_samples(&[
            (BoardTexture::TopPair, 80.0),
            (BoardTexture::TopPair, 90.0),
            (BoardTexture::DryBoard, 40.0),
        ]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.get(BoardTexture::TopPair).unwrap().avg, 85.0);
        assert_eq!(report.get(BoardTexture::TopPair).unwrap().count, 2);
        assert!(report.get(BoardTexture::FlushDraw).is_none());
        assert_eq!(report.total_samples(), 3);

        let order: Vec<BoardTexture> = report.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec![BoardTexture::TopPair, BoardTexture::DryBoard]);
    }

    #[test]
    fn test_batch_counts_are_exhaustive() {
        let mut rng = StdRng::seed_from_u64(21);
        let report = batch_analyze(&parse_cards("AhKh").unwrap(), 2, 120, 50, &mut rng).unwrap();
        assert_eq!(report.total_samples(), 120);
        for (_, stats) in report.iter() {
            assert!(stats.count > 0);
            assert!((0.0..=100.0).contains(&stats.avg));
        }
    }

    #[test]
    fn test_top_pair_beats_dry_board() {
        let mut rng = StdRng::seed_from_u64(8);
        let report = batch_analyze(&parse_cards("AsKd").unwrap(), 1, 300, 100, &mut rng).unwrap();
        let top = report.get(BoardTexture::TopPair).unwrap().avg;
        let dry = report.get(BoardTexture::DryBoard).unwrap().avg;
        assert!(top > dry, "top pair {} should beat dry board {}", top, dry);
    }

    #[test]
    fn test_batch_validation() {
        let mut rng = StdRng::seed_from_u64(0);
        let hero = parse_cards("AhKh").unwrap();
        assert!(matches!(
            batch_analyze(&hero, 2, 0, 50, &mut rng),
            Err(EquityError::Validation(_))
        ));
        assert!(matches!(
            batch_analyze(&hero, 2, 10, 0, &mut rng),
            Err(EquityError::Validation(_))
        ));
        assert!(matches!(
            batch_analyze(&hero[..1], 2, 10, 50, &mut rng),
            Err(EquityError::Validation(_))
        ));
        assert!(matches!(
            batch_analyze(&hero, 0, 10, 50, &mut rng),
            Err(EquityError::Validation(_))
        ));
    }

    #[test]
    fn test_parallel_batch_deterministic() {
        let hero = parse_cards("9s8s").unwrap();
        let run = |threads| {
            EquitySimulator::new(SimConfig::new().with_seed(5).with_threads(threads))
                .unwrap()
                .batch_analyze(&hero, 3, 60, 40)
                .unwrap()
        };
        let a = run(1);
        let b = run(3);
        assert_eq!(a.total_samples(), 60);
        for texture in BoardTexture::ALL {
            match (a.get(texture), b.get(texture)) {
                (Some(x), Some(y)) => {
                    assert_eq!(x.count, y.count);
                    assert!((x.avg - y.avg).abs() < 1e-9);
                }
                (None, None) => {}
                _ => panic!("bucket {} differs between thread counts", texture),
            }
        }
    }

    #[test]
    fn test_progress_called_per_flop() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = AtomicU32::new(0);
        let sim = EquitySimulator::new(SimConfig::new().with_seed(2)).unwrap();
        sim.batch_analyze_with_progress(&parse_cards("QcQd").unwrap(), 1, 25, 20, || {
            calls.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 25);
    }

    #[test]
    fn test_report_json_uses_labels() {
        let report = TextureReport::from_samples(&[(BoardTexture::FlushDraw, 40.0)]);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"Flush Draw":{"avg":40.0,"count":1}}"#);
    }
}
