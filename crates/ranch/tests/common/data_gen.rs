//! Data generation utilities for testing.

use rand::{rngs::StdRng, Rng, SeedableRng};

use ranch::PointSet;

/// Uniformly random points in a hypercube, reproducible from the seed.
pub fn random_points(cardinality: usize, dimensionality: usize, min: f64, max: f64, seed: u64) -> PointSet<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..cardinality)
        .map(|_| (0..dimensionality).map(|_| rng.gen_range(min..max)).collect())
        .collect();
    PointSet::new(points).unwrap().with_name("random")
}

/// Evenly spaced points on a line, so that all pairwise distances are
/// exact in floating point.
pub fn line(cardinality: usize) -> PointSet<f64> {
    let points = (0..cardinality).map(|i| vec![i as f64]).collect();
    PointSet::new(points).unwrap().with_name("line")
}

/// The six 3-d reference points used by the hand-checked scenario, with
/// points given as the columns of the matrix.
pub fn scenario() -> PointSet<f64> {
    PointSet::from_columns(vec![
        vec![0.0, 3.0, 3.0, 4.0, 3.0, 1.0],
        vec![4.0, 4.0, 4.0, 5.0, 5.0, 2.0],
        vec![0.0, 1.0, 2.0, 2.0, 3.0, 3.0],
    ])
    .unwrap()
    .with_name("scenario")
}
