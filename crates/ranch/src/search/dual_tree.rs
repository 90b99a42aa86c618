//! Range search with trees over both the reference and query sets.
//!
//! The traversal recurses over pairs of nodes, one from each tree, and
//! makes the same three-way decision as the single-tree strategy against
//! the pair's bound-to-bound distances. A single prune or report-all
//! decision therefore resolves an entire block of queries against an
//! entire block of references, which is the efficiency gain over the
//! single-tree strategy. In self-search the reference tree serves both
//! roles.

use crate::{tree::Node, Bound, Interval, Metric, PointSet, SpatialTree};

/// Finds, for every query point, all reference points within `interval`.
///
/// `self_mode` marks a self-search: `queries`/`query_tree` alias
/// `data`/`tree` and a point is never matched with itself.
#[allow(clippy::too_many_arguments)]
pub fn search<B: Bound, M: Metric<Vec<B::Dist>, B::Dist>>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    queries: &PointSet<B::Dist>,
    query_tree: &SpatialTree<B>,
    metric: &M,
    interval: &Interval<B::Dist>,
    self_mode: bool,
) -> Vec<Vec<(usize, B::Dist)>> {
    let mut results = vec![Vec::new(); queries.cardinality()];
    descend(
        data,
        tree,
        tree.root(),
        queries,
        query_tree,
        query_tree.root(),
        metric,
        interval,
        self_mode,
        &mut results,
    );
    results
}

/// Parallel version of [`search`].
///
/// The traversal is already batched over all queries, so this delegates to
/// the serial version; parallelism across strategies is applied by the
/// engine at the batch seam.
#[allow(clippy::too_many_arguments)]
pub fn par_search<B: Bound, M: Metric<Vec<B::Dist>, B::Dist> + Send + Sync>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    queries: &PointSet<B::Dist>,
    query_tree: &SpatialTree<B>,
    metric: &M,
    interval: &Interval<B::Dist>,
    self_mode: bool,
) -> Vec<Vec<(usize, B::Dist)>> {
    search(data, tree, queries, query_tree, metric, interval, self_mode)
}

/// Reports every (query, reference) pair covered by the two nodes,
/// computing exact distances but skipping the interval check.
#[allow(clippy::too_many_arguments)]
fn report_all<B: Bound, M: Metric<Vec<B::Dist>, B::Dist>>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    r_node: &Node<B>,
    queries: &PointSet<B::Dist>,
    query_tree: &SpatialTree<B>,
    q_node: &Node<B>,
    metric: &M,
    self_mode: bool,
    results: &mut [Vec<(usize, B::Dist)>],
) {
    for qi in query_tree.point_indices(q_node) {
        for ri in tree.point_indices(r_node) {
            if self_mode && ri == qi {
                continue;
            }
            results[qi].push((ri, metric.distance(data.get(ri), queries.get(qi))));
        }
    }
}

/// The recursive three-way descent over node pairs.
#[allow(clippy::too_many_arguments)]
fn descend<B: Bound, M: Metric<Vec<B::Dist>, B::Dist>>(
    data: &PointSet<B::Dist>,
    tree: &SpatialTree<B>,
    r_node: &Node<B>,
    queries: &PointSet<B::Dist>,
    query_tree: &SpatialTree<B>,
    q_node: &Node<B>,
    metric: &M,
    interval: &Interval<B::Dist>,
    self_mode: bool,
    results: &mut [Vec<(usize, B::Dist)>],
) {
    let min_d = r_node.bound().min_to_bound(q_node.bound());
    let max_d = r_node.bound().max_to_bound(q_node.bound());

    // No pair covered by these nodes can land inside the interval.
    if max_d < interval.min() || min_d > interval.max() {
        return;
    }

    // Every pair covered by these nodes is guaranteed in range.
    if min_d >= interval.min() && max_d <= interval.max() {
        report_all(data, tree, r_node, queries, query_tree, q_node, metric, self_mode, results);
        return;
    }

    match (r_node.children(), q_node.children()) {
        (None, None) => {
            for qi in query_tree.point_indices(q_node) {
                let query = queries.get(qi);
                for ri in tree.point_indices(r_node) {
                    if self_mode && ri == qi {
                        continue;
                    }
                    let d = metric.distance(data.get(ri), query);
                    if interval.contains(d) {
                        results[qi].push((ri, d));
                    }
                }
            }
        }
        (Some((r_left, r_right)), None) => {
            descend(data, tree, r_left, queries, query_tree, q_node, metric, interval, self_mode, results);
            descend(data, tree, r_right, queries, query_tree, q_node, metric, interval, self_mode, results);
        }
        (None, Some((q_left, q_right))) => {
            descend(data, tree, r_node, queries, query_tree, q_left, metric, interval, self_mode, results);
            descend(data, tree, r_node, queries, query_tree, q_right, metric, interval, self_mode, results);
        }
        (Some((r_left, r_right)), Some((q_left, q_right))) => {
            descend(data, tree, r_left, queries, query_tree, q_left, metric, interval, self_mode, results);
            descend(data, tree, r_left, queries, query_tree, q_right, metric, interval, self_mode, results);
            descend(data, tree, r_right, queries, query_tree, q_left, metric, interval, self_mode, results);
            descend(data, tree, r_right, queries, query_tree, q_right, metric, interval, self_mode, results);
        }
    }
}
