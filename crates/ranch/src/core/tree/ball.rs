//! The ball tree split rule.

use distances::number::Float;

use crate::{utils, PointSet};

use super::{median_split, SplitRule, Sphere};

/// The furthest-point heuristic: pole `a` is the point furthest from the
/// node's center, pole `b` is the point furthest from `a`, and every point
/// goes to the pole it is nearer to (ties go to `a`).
///
/// Falls back to a median split by distance to `a` when every point lands
/// on one side, e.g. when all points coincide.
pub struct TwoPointSplit;

impl<F: Float> SplitRule<Sphere<F>> for TwoPointSplit {
    fn split(&self, data: &PointSet<F>, bound: &Sphere<F>, indices: &mut [usize], _offset: usize) -> usize {
        let from_center = indices
            .iter()
            .map(|&i| distances::vectors::euclidean::<F, F>(bound.center(), data.get(i)))
            .collect::<Vec<_>>();
        let (arg_a, _) = utils::arg_max(&from_center)
            .unwrap_or_else(|| unreachable!("a node always holds at least one point"));
        let pole_a = indices[arg_a];

        let from_a = indices
            .iter()
            .map(|&i| distances::vectors::euclidean::<F, F>(data.get(pole_a), data.get(i)))
            .collect::<Vec<_>>();
        let (arg_b, _) = utils::arg_max(&from_a)
            .unwrap_or_else(|| unreachable!("a node always holds at least one point"));
        let pole_b = indices[arg_b];

        let (left, right): (Vec<usize>, Vec<usize>) = indices.iter().copied().partition(|&i| {
            let d_a = distances::vectors::euclidean::<F, F>(data.get(pole_a), data.get(i));
            let d_b = distances::vectors::euclidean::<F, F>(data.get(pole_b), data.get(i));
            d_a <= d_b
        });

        if left.is_empty() || right.is_empty() {
            return median_split::<Sphere<F>, _>(indices, |i| {
                distances::vectors::euclidean::<F, F>(data.get(pole_a), data.get(i))
            });
        }

        let mid = left.len();
        indices[..mid].copy_from_slice(&left);
        indices[mid..].copy_from_slice(&right);
        mid
    }
}
