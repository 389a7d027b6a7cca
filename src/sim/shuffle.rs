//! Randomness boundary.
//!
//! Every random decision in the crate goes through an explicitly passed
//! `Rng`. Nothing here owns a generator, so seeded runs are reproducible and
//! parallel workers never share generator state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::cards::Card;

/// Uniformly permute `cards` in place (Fisher-Yates).
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// Return a shuffled copy of `cards`.
pub fn shuffled<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut out = cards.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Draw `n` cards without replacement.
///
/// Equivalent to taking the first `n` cards of a uniform permutation, but only
/// performs `n` swaps. `cards` is reordered as a side effect.
pub fn draw<'a, R: Rng + ?Sized>(cards: &'a mut [Card], n: usize, rng: &mut R) -> &'a [Card] {
    let (drawn, _) = cards.partial_shuffle(rng, n);
    drawn
}

/// A generator from a fixed seed, or from OS entropy when `seed` is `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Split one generator into `n` child seeds, one per independent worker.
pub fn seed_stream<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::full_deck;
    use rustc_hash::{FxHashMap, FxHashSet};

    #[test]
    fn test_shuffle_is_permutation() {
        let deck = full_deck();
        let mut rng = StdRng::seed_from_u64(1);
        let out = shuffled(&deck, &mut rng);
        assert_eq!(out.len(), 52);
        let unique: FxHashSet<Card> = out.iter().copied().collect();
        assert_eq!(unique.len(), 52);
        assert_ne!(out, deck);
    }

    #[test]
    fn test_same_seed_same_order() {
        let deck = full_deck();
        let a = shuffled(&deck, &mut rng_from_seed(Some(42)));
        let b = shuffled(&deck, &mut rng_from_seed(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut deck = full_deck();
        let mut rng = StdRng::seed_from_u64(3);
        let drawn = draw(&mut deck, 23, &mut rng).to_vec();
        assert_eq!(drawn.len(), 23);
        let unique: FxHashSet<Card> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 23);
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn test_draw_is_roughly_uniform() {
        // Each of 4 cards should lead a 1-card draw about a quarter of the time.
        let mut cards = full_deck()[..4].to_vec();
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts: FxHashMap<Card, u32> = FxHashMap::default();
        for _ in 0..40_000 {
            *counts.entry(draw(&mut cards, 1, &mut rng)[0]).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        for &n in counts.values() {
            assert!((9_000..11_000).contains(&n), "count {} outside tolerance", n);
        }
    }

    #[test]
    fn test_seed_stream() {
        let mut rng = StdRng::seed_from_u64(9);
        let seeds = seed_stream(&mut rng, 16);
        assert_eq!(seeds.len(), 16);
        let unique: FxHashSet<u64> = seeds.iter().copied().collect();
        assert_eq!(unique.len(), 16);
        assert_eq!(seeds, seed_stream(&mut StdRng::seed_from_u64(9), 16));
    }
}
