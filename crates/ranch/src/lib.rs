#![doc = include_str!("../README.md")]

mod basis;
mod core;
mod error;
mod interval;
mod model;
mod output;
pub mod search;
pub mod utils;

pub use basis::RandomBasis;
pub use core::{
    dataset, metric, tree, Bound, BuiltTree, Euclidean, HyperRect, Manhattan, Metric, Node, PointSet, SpatialTree,
    Sphere, TreeVariant,
};
pub use error::RangeSearchError;
pub use interval::Interval;
pub use model::{RangeSearch, RangeSearchConfig};
pub use output::save_results;

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
