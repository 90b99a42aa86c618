//! Range search with a tree over the reference set only.
//!
//! Each query descends the reference tree independently. At every node the
//! bound-to-point distances drive a three-way decision:
//!
//! - **prune** when the node cannot hold an in-range point,
//! - **report the whole subtree** when every point is guaranteed in range,
//! - **recurse** (or exact-check, at a leaf) otherwise.

use rayon::prelude::*;

use crate::{tree::Node, Bound, Interval, Metric, PointSet, SpatialTree};

/// Finds all reference points within `interval` of `query` using a single
/// depth-first descent of the reference tree.
///
/// `exclude` suppresses a single reference index, as in
/// [`naive::search`](crate::search::naive::search).
pub fn search<B: Bound, M: Metric<Vec<B::Dist>, B::Dist>>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    metric: &M,
    query: &Vec<B::Dist>,
    interval: &Interval<B::Dist>,
    exclude: Option<usize>,
) -> Vec<(usize, B::Dist)> {
    let mut hits = Vec::new();
    descend(data, tree, tree.root(), metric, query, interval, exclude, &mut hits);
    hits
}

/// Runs [`search`] for every query point.
pub fn batch_search<B: Bound, M: Metric<Vec<B::Dist>, B::Dist>>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    metric: &M,
    queries: &PointSet<B::Dist>,
    interval: &Interval<B::Dist>,
    self_mode: bool,
) -> Vec<Vec<(usize, B::Dist)>> {
    queries
        .points()
        .iter()
        .enumerate()
        .map(|(qi, q)| search(data, tree, metric, q, interval, self_mode.then_some(qi)))
        .collect()
}

/// Parallel version of [`batch_search`].
pub fn par_batch_search<B: Bound, M: Metric<Vec<B::Dist>, B::Dist> + Send + Sync>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    metric: &M,
    queries: &PointSet<B::Dist>,
    interval: &Interval<B::Dist>,
    self_mode: bool,
) -> Vec<Vec<(usize, B::Dist)>> {
    queries
        .points()
        .par_iter()
        .enumerate()
        .map(|(qi, q)| search(data, tree, metric, q, interval, self_mode.then_some(qi)))
        .collect()
}

/// The recursive three-way descent.
#[allow(clippy::too_many_arguments)]
fn descend<B: Bound, M: Metric<Vec<B::Dist>, B::Dist>>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    node: &Node<B>,
    metric: &M,
    query: &Vec<B::Dist>,
    interval: &Interval<B::Dist>,
    exclude: Option<usize>,
    hits: &mut Vec<(usize, B::Dist)>,
) {
    let min_d = node.bound().min_to_point(query);
    let max_d = node.bound().max_to_point(query);

    // No point in the subtree can land inside the interval.
    if max_d < interval.min() || min_d > interval.max() {
        return;
    }

    // Every point in the subtree is guaranteed in range; distances are
    // still computed exactly for the output, but no point is re-checked
    // against the interval.
    if min_d >= interval.min() && max_d <= interval.max() {
        for i in tree.point_indices(node) {
            if exclude != Some(i) {
                hits.push((i, metric.distance(data.get(i), query)));
            }
        }
        return;
    }

    match node.children() {
        None => {
            for i in tree.point_indices(node) {
                if exclude == Some(i) {
                    continue;
                }
                let d = metric.distance(data.get(i), query);
                if interval.contains(d) {
                    hits.push((i, d));
                }
            }
        }
        Some((left, right)) => {
            descend(data, tree, left, metric, query, interval, exclude, hits);
            descend(data, tree, right, metric, query, interval, exclude, hits);
        }
    }
}
