//! The random orthogonal basis preprocessor.
//!
//! An orthogonal rotation of the input coordinates, applied uniformly to
//! reference and query data. It changes the tree's structure and the
//! serialized identity of a model, but never which points are reported in
//! range: orthogonal transforms preserve Euclidean distances up to
//! floating-point rounding.

use distances::number::Float;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::{utils, PointSet};

/// Rows of vectors in an orthonormalization are considered degenerate
/// below this norm and force a redraw of the whole matrix.
const DEGENERACY_THRESHOLD: f64 = 1e-10;

/// A random orthogonal basis of a d-dimensional space.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RandomBasis<F: Float> {
    /// The rows of the basis matrix.
    rows: Vec<Vec<F>>,
}

impl<F: Float> RandomBasis<F> {
    /// Generates a random orthogonal basis by Gram-Schmidt orthonormalization
    /// of a Gaussian matrix.
    ///
    /// The factorization is made unique by normalizing every row to unit
    /// length with a positive leading coefficient against its predecessors,
    /// so a given seed always produces the same basis.
    #[must_use]
    pub fn new(dimensionality: usize, seed: Option<u64>) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        loop {
            let gaussian = (0..dimensionality)
                .map(|_| (0..dimensionality).map(|_| rng.sample(StandardNormal)).collect())
                .collect::<Vec<Vec<f64>>>();
            if let Some(rows) = orthonormalize(&gaussian) {
                let rows = rows
                    .into_iter()
                    .map(|row| row.into_iter().map(F::from).collect())
                    .collect();
                return Self { rows };
            }
        }
    }

    /// The dimensionality of the space the basis spans.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.rows.len()
    }

    /// Rotates a single point into the basis.
    #[must_use]
    pub fn project_point(&self, point: &[F]) -> Vec<F> {
        self.rows.iter().map(|row| utils::dot(row, point)).collect()
    }

    /// Rotates every point of a set into the basis.
    #[must_use]
    pub fn project(&self, data: &PointSet<F>) -> PointSet<F> {
        let points = data.points().iter().map(|p| self.project_point(p)).collect();
        PointSet::new(points)
            .unwrap_or_else(|e| unreachable!("projection preserves cardinality and dimensionality: {e}"))
            .with_name(data.name())
    }
}

/// Modified Gram-Schmidt over the rows of `m`, in `f64` for stability.
///
/// Returns `None` when the rows are too close to linearly dependent, which
/// for a Gaussian draw means the caller should simply redraw.
fn orthonormalize(m: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(m.len());
    for row in m {
        let mut v = row.clone();
        for u in &basis {
            let coefficient = utils::dot(u, &v);
            for (vi, &ui) in v.iter_mut().zip(u.iter()) {
                *vi -= coefficient * ui;
            }
        }
        let norm = utils::dot(&v, &v).sqrt();
        if norm < DEGENERACY_THRESHOLD {
            return None;
        }
        for vi in &mut v {
            *vi /= norm;
        }
        basis.push(v);
    }
    Some(basis)
}

#[cfg(test)]
mod tests {
    use super::RandomBasis;
    use crate::{utils, Euclidean, Metric, PointSet};

    #[test]
    fn rows_are_orthonormal() {
        let basis = RandomBasis::<f64>::new(8, Some(42));
        for (i, u) in basis.rows.iter().enumerate() {
            for (j, v) in basis.rows.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (utils::dot(u, v) - expected).abs() < 1e-9,
                    "rows {i} and {j} are not orthonormal"
                );
            }
        }
    }

    #[test]
    fn preserves_distances() {
        let basis = RandomBasis::<f64>::new(3, Some(7));
        let data = PointSet::new(vec![vec![1.0, 2.0, 3.0], vec![-4.0, 0.5, 2.0], vec![0.0, 0.0, 0.0]]).unwrap();
        let rotated = basis.project(&data);

        for i in 0..data.cardinality() {
            for j in 0..data.cardinality() {
                let before: f64 = Euclidean.distance(data.get(i), data.get(j));
                let after: f64 = Euclidean.distance(rotated.get(i), rotated.get(j));
                assert!((before - after).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = RandomBasis::<f64>::new(5, Some(13));
        let b = RandomBasis::<f64>::new(5, Some(13));
        assert_eq!(a.rows, b.rows);
    }
}
