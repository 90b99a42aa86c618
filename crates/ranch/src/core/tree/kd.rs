//! The k-d tree split rule.

use distances::number::Float;

use crate::PointSet;

use super::{median_split, HyperRect, SplitRule};

/// Splits at the midpoint of the widest dimension of the node's bound.
///
/// Falls back to a median split along the same dimension when every point
/// lands on one side, which guarantees that both children are non-empty.
pub struct MidpointSplit;

impl<F: Float> SplitRule<HyperRect<F>> for MidpointSplit {
    fn split(&self, data: &PointSet<F>, bound: &HyperRect<F>, indices: &mut [usize], _offset: usize) -> usize {
        let (dim, _) = bound.widest_dimension();
        let lo = bound.lo()[dim];
        let hi = bound.hi()[dim];
        let mid_value = lo + (hi - lo).half();

        let (left, right): (Vec<usize>, Vec<usize>) =
            indices.iter().copied().partition(|&i| data.coordinate(i, dim) < mid_value);

        if left.is_empty() || right.is_empty() {
            return median_split::<HyperRect<F>, _>(indices, |i| data.coordinate(i, dim));
        }

        let mid = left.len();
        indices[..mid].copy_from_slice(&left);
        indices[mid..].copy_from_slice(&right);
        mid
    }
}
