//! The vantage-point tree split rule.

use distances::number::Float;

use crate::PointSet;

use super::{median_split, SplitRule, Sphere};

/// Splits around a vantage point: the first point in the node's slice,
/// with the nearer half of the points on the left and the farther half on
/// the right.
pub struct VantageSplit;

impl<F: Float> SplitRule<Sphere<F>> for VantageSplit {
    fn split(&self, data: &PointSet<F>, _bound: &Sphere<F>, indices: &mut [usize], _offset: usize) -> usize {
        let vantage = indices[0];
        median_split::<Sphere<F>, _>(indices, |i| {
            distances::vectors::euclidean::<F, F>(data.get(vantage), data.get(i))
        })
    }
}
