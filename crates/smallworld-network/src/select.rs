//! Weighted random bin selection.

use rand::Rng;

use crate::error::{Error, Result};

/// Pick a bin index with probability proportional to its weight.
///
/// Weights are normalized to sum to one, a uniform `r` in `[0, 1)` is
/// drawn, and the smallest index whose cumulative weight exceeds `r` is
/// returned. Zero-weight bins are never picked. Fails with
/// [`Error::EmptyWeightDistribution`] when there is nothing to pick from.
pub fn select_bin<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize> {
    debug_assert!(weights.iter().all(|w| *w >= 0.0), "negative bin weight");

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::EmptyWeightDistribution);
    }

    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w / total;
        if cumulative > r {
            return Ok(i);
        }
    }

    // Rounding left the cumulative sum just short of r
    weights
        .iter()
        .rposition(|w| *w > 0.0)
        .ok_or(Error::EmptyWeightDistribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_weights_are_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            counts[select_bin(&[1.0, 1.0, 1.0, 1.0], &mut rng).unwrap()] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            let freq = c as f64 / 10_000.0;
            assert!((freq - 0.25).abs() < 0.03, "bin {} frequency {}", i, freq);
        }
    }

    #[test]
    fn skewed_weights_follow_proportions() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 2];
        for _ in 0..20_000 {
            counts[select_bin(&[3.0, 1.0], &mut rng).unwrap()] += 1;
        }
        let freq = counts[0] as f64 / 20_000.0;
        assert!((freq - 0.75).abs() < 0.03, "frequency {}", freq);
    }

    #[test]
    fn zero_weight_bins_never_chosen() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            assert_eq!(select_bin(&[0.0, 5.0, 0.0], &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn all_zero_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            select_bin(&[0.0, 0.0], &mut rng),
            Err(Error::EmptyWeightDistribution)
        ));
        assert!(matches!(select_bin(&[], &mut rng), Err(Error::EmptyWeightDistribution)));
    }

    proptest! {
        #[test]
        fn index_in_range_with_positive_weight(
            weights in prop::collection::vec(0.0f64..100.0, 1..20),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            match select_bin(&weights, &mut rng) {
                Ok(i) => {
                    prop_assert!(i < weights.len());
                    prop_assert!(weights[i] > 0.0);
                }
                Err(_) => prop_assert!(weights.iter().all(|w| *w == 0.0)),
            }
        }
    }
}
