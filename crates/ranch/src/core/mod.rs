//! The core traits and structs for RANCH.

pub mod dataset;
pub mod metric;
pub mod tree;

pub use dataset::PointSet;
pub use metric::{Euclidean, Manhattan, Metric};
pub use tree::{Bound, BuiltTree, HyperRect, Node, SpatialTree, Sphere, TreeVariant};
