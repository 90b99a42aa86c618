//! Exhaustive range search with no index.

use distances::number::Float;
use rayon::prelude::*;

use crate::{Interval, Metric, PointSet};

/// Finds all reference points within `interval` of `query` by comparing
/// against every reference point.
///
/// `exclude` suppresses a single reference index; self-search passes the
/// query's own index so that a point is never reported as being in range
/// of itself.
pub fn search<F: Float, M: Metric<Vec<F>, F>>(
    data: &PointSet<F>,
    metric: &M,
    query: &Vec<F>,
    interval: &Interval<F>,
    exclude: Option<usize>,
) -> Vec<(usize, F)> {
    data.points()
        .iter()
        .enumerate()
        .filter(|&(i, _)| exclude != Some(i))
        .map(|(i, p)| (i, metric.distance(p, query)))
        .filter(|&(_, d)| interval.contains(d))
        .collect()
}

/// Runs [`search`] for every query point.
pub fn batch_search<F: Float, M: Metric<Vec<F>, F>>(
    data: &PointSet<F>,
    metric: &M,
    queries: &PointSet<F>,
    interval: &Interval<F>,
    self_mode: bool,
) -> Vec<Vec<(usize, F)>> {
    queries
        .points()
        .iter()
        .enumerate()
        .map(|(qi, q)| search(data, metric, q, interval, self_mode.then_some(qi)))
        .collect()
}

/// Parallel version of [`batch_search`].
pub fn par_batch_search<F: Float, M: Metric<Vec<F>, F> + Send + Sync>(
    data: &PointSet<F>,
    metric: &M,
    queries: &PointSet<F>,
    interval: &Interval<F>,
    self_mode: bool,
) -> Vec<Vec<(usize, F)>> {
    queries
        .points()
        .par_iter()
        .enumerate()
        .map(|(qi, q)| search(data, metric, q, interval, self_mode.then_some(qi)))
        .collect()
}
