//! The random-projection tree split rule.

use distances::number::Float;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{utils, PointSet};

use super::{median_split, HyperRect, SplitRule};

/// Splits at the median projection onto a random Gaussian direction.
///
/// The direction is drawn from a per-node stream seeded by the rule's seed
/// and the node's position, so the same seed always produces the same
/// tree regardless of construction order.
pub struct RandomHyperplaneSplit {
    /// The seed for the per-node direction streams.
    seed: u64,
}

impl RandomHyperplaneSplit {
    /// Creates a new `RandomHyperplaneSplit` with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl<F: Float> SplitRule<HyperRect<F>> for RandomHyperplaneSplit {
    fn split(&self, data: &PointSet<F>, _bound: &HyperRect<F>, indices: &mut [usize], offset: usize) -> usize {
        let node_seed = self.seed ^ ((offset as u64) << 32) ^ (indices.len() as u64);
        let mut rng = StdRng::seed_from_u64(node_seed);
        let direction = (0..data.dimensionality())
            .map(|_| F::from(rng.sample::<f64, _>(StandardNormal)))
            .collect::<Vec<_>>();

        median_split::<HyperRect<F>, _>(indices, |i| utils::dot(data.get(i), &direction))
    }
}
