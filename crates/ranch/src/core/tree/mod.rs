//! Spatial trees over point sets.
//!
//! Every tree variant shares the same structure: a binary hierarchy of
//! nodes, each owning a contiguous slice of the permutation array that the
//! root holds, and a bounding volume that contains every point in the
//! node's subtree. Variants differ only in their split rule and bound
//! shape, so the traversal strategies are written once against the
//! [`Bound`] contract.

use serde::{Deserialize, Serialize};

use crate::utils::NumberExt;
use crate::PointSet;

mod ball;
mod bound;
mod kd;
mod rp;
mod variant;
mod vp;

pub use ball::TwoPointSplit;
pub use bound::{Bound, HyperRect, Sphere};
pub use kd::MidpointSplit;
pub use rp::RandomHyperplaneSplit;
pub use variant::{BuiltTree, TreeVariant};
pub use vp::VantageSplit;

/// A rule for partitioning a node's index slice into two children.
///
/// Implementations reorder `indices` in place and return the split
/// position `mid`, with `1 <= mid < indices.len()`: the left child takes
/// `indices[..mid]` and the right child takes `indices[mid..]`. Splits
/// must be deterministic given identical input order, leaf size, and seed.
pub trait SplitRule<B: Bound> {
    /// Reorders `indices` and returns the split position.
    ///
    /// `indices` always holds at least two entries, and `offset` is the
    /// node's position in the tree's permutation array.
    fn split(&self, data: &PointSet<B::Dist>, bound: &B, indices: &mut [usize], offset: usize) -> usize;
}

/// Reorders `indices` by the given key and splits at the median.
///
/// Ties are broken by index so that the ordering is total and the split is
/// deterministic.
pub(crate) fn median_split<B: Bound, K: Fn(usize) -> B::Dist>(indices: &mut [usize], key: K) -> usize {
    indices.sort_by(|&a, &b| key(a).total_cmp(&key(b)).then(a.cmp(&b)));
    indices.len() / 2
}

/// A node in a spatial tree.
///
/// A node exclusively owns its children and refers to its points through a
/// contiguous range of the tree's permutation array.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node<B: Bound> {
    /// The bounding volume of the node's subtree.
    bound: B,
    /// The node's starting position in the permutation array.
    offset: usize,
    /// The number of points in the node's subtree.
    cardinality: usize,
    /// The two children, absent for a leaf.
    children: Option<Box<(Node<B>, Node<B>)>>,
}

impl<B: Bound> Node<B> {
    /// The bounding volume of the node's subtree.
    pub fn bound(&self) -> &B {
        &self.bound
    }

    /// The node's starting position in the permutation array.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of points in the node's subtree.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// The node's range of positions in the permutation array.
    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..(self.offset + self.cardinality)
    }

    /// Whether the node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The two children, or `None` for a leaf.
    pub fn children(&self) -> Option<(&Self, &Self)> {
        self.children.as_ref().map(|c| (&c.0, &c.1))
    }
}

/// A spatial tree over a point set.
///
/// The tree does not own or reorder the points; it owns a permutation
/// array mapping tree order back to the original indices, and each node
/// owns a contiguous slice of that array.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpatialTree<B: Bound> {
    /// The root node.
    root: Node<B>,
    /// Maps tree order to original point indices.
    permutation: Vec<usize>,
    /// The maximum number of points in a leaf.
    leaf_size: usize,
}

impl<B: Bound> SpatialTree<B> {
    /// Builds a tree over `data` by recursively applying `rule` until every
    /// leaf holds at most `leaf_size` points.
    ///
    /// `data` must not be empty and `leaf_size` must be at least 1; both are
    /// checked by the engine before any tree is built.
    pub fn new<S: SplitRule<B>>(data: &PointSet<B::Dist>, leaf_size: usize, rule: &S) -> Self {
        let mut permutation = (0..data.cardinality()).collect::<Vec<_>>();
        let root = build_node(data, &mut permutation, 0, leaf_size, rule);
        Self {
            root,
            permutation,
            leaf_size,
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node<B> {
        &self.root
    }

    /// The permutation array mapping tree order to original indices.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// The original index of the point at `tree_index` in tree order.
    pub fn original_index(&self, tree_index: usize) -> usize {
        self.permutation[tree_index]
    }

    /// The original indices of the points owned by `node`'s subtree, in
    /// tree order.
    pub fn point_indices<'a>(&'a self, node: &Node<B>) -> impl Iterator<Item = usize> + 'a {
        node.range().map(move |t| self.permutation[t])
    }

    /// The leaf size the tree was built with.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }
}

/// Recursively builds the node owning `indices`, a slice of the permutation
/// array starting at `offset`.
fn build_node<B: Bound, S: SplitRule<B>>(
    data: &PointSet<B::Dist>,
    indices: &mut [usize],
    offset: usize,
    leaf_size: usize,
    rule: &S,
) -> Node<B> {
    let mut bound = B::from_points(data, indices);
    let cardinality = indices.len();

    if cardinality <= leaf_size {
        return Node {
            bound,
            offset,
            cardinality,
            children: None,
        };
    }

    let mid = rule.split(data, &bound, indices, offset);
    debug_assert!(mid >= 1 && mid < cardinality, "split must leave both children non-empty");

    let (left_indices, right_indices) = indices.split_at_mut(mid);
    let left = build_node(data, left_indices, offset, leaf_size, rule);
    let right = build_node(data, right_indices, offset + mid, leaf_size, rule);

    bound.expand_to_contain(left.bound());
    bound.expand_to_contain(right.bound());

    Node {
        bound,
        offset,
        cardinality,
        children: Some(Box::new((left, right))),
    }
}
