//! The closed set of supported tree variants.

use core::str::FromStr;

use distances::number::Float;
use serde::{Deserialize, Serialize};

use crate::{PointSet, RangeSearchError};

use super::{HyperRect, MidpointSplit, RandomHyperplaneSplit, SpatialTree, Sphere, TwoPointSplit, VantageSplit};

/// The tree variants a model can be built with.
///
/// Every variant satisfies the same structural contract; they differ only
/// in split rule and bound shape, so adding one never touches the
/// traversal strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TreeVariant {
    /// Axis-aligned k-d tree with midpoint splits.
    #[default]
    Kd,
    /// Ball tree with furthest-point splits.
    Ball,
    /// Vantage-point tree with median-distance splits.
    Vp,
    /// Random-projection tree with median-projection splits.
    Rp,
}

impl TreeVariant {
    /// All supported variants.
    pub const ALL: [Self; 4] = [Self::Kd, Self::Ball, Self::Vp, Self::Rp];

    /// The name of the variant, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kd => "kd",
            Self::Ball => "ball",
            Self::Vp => "vp",
            Self::Rp => "rp",
        }
    }
}

impl core::fmt::Display for TreeVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeVariant {
    type Err = RangeSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kd" => Ok(Self::Kd),
            "ball" => Ok(Self::Ball),
            "vp" => Ok(Self::Vp),
            "rp" => Ok(Self::Rp),
            _ => Err(RangeSearchError::Config(format!(
                "unknown tree type {s:?}; expected one of \"kd\", \"ball\", \"vp\", \"rp\""
            ))),
        }
    }
}

/// A constructed tree, tagged by its variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BuiltTree<F: Float> {
    /// An axis-aligned k-d tree.
    Kd(SpatialTree<HyperRect<F>>),
    /// A ball tree.
    Ball(SpatialTree<Sphere<F>>),
    /// A vantage-point tree.
    Vp(SpatialTree<Sphere<F>>),
    /// A random-projection tree.
    Rp(SpatialTree<HyperRect<F>>),
}

impl<F: Float> BuiltTree<F> {
    /// Builds a tree of the requested variant over `data`.
    ///
    /// The `seed` is only consulted by variants whose split rule is
    /// randomized; an unseeded build of such a variant draws a fresh seed.
    pub fn build(data: &PointSet<F>, variant: TreeVariant, leaf_size: usize, seed: Option<u64>) -> Self {
        match variant {
            TreeVariant::Kd => Self::Kd(SpatialTree::new(data, leaf_size, &MidpointSplit)),
            TreeVariant::Ball => Self::Ball(SpatialTree::new(data, leaf_size, &TwoPointSplit)),
            TreeVariant::Vp => Self::Vp(SpatialTree::new(data, leaf_size, &VantageSplit)),
            TreeVariant::Rp => Self::Rp(SpatialTree::new(
                data,
                leaf_size,
                &RandomHyperplaneSplit::new(seed.unwrap_or_else(rand::random)),
            )),
        }
    }

    /// The variant tag of this tree.
    #[must_use]
    pub fn variant(&self) -> TreeVariant {
        match self {
            Self::Kd(_) => TreeVariant::Kd,
            Self::Ball(_) => TreeVariant::Ball,
            Self::Vp(_) => TreeVariant::Vp,
            Self::Rp(_) => TreeVariant::Rp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TreeVariant;
    use crate::RangeSearchError;

    #[test]
    fn parsing() {
        assert_eq!("kd".parse::<TreeVariant>().unwrap(), TreeVariant::Kd);
        assert_eq!("ball".parse::<TreeVariant>().unwrap(), TreeVariant::Ball);
        assert_eq!("vp".parse::<TreeVariant>().unwrap(), TreeVariant::Vp);
        assert_eq!("rp".parse::<TreeVariant>().unwrap(), TreeVariant::Rp);

        let err = "RST".parse::<TreeVariant>().unwrap_err();
        assert!(matches!(err, RangeSearchError::Config(_)));
    }

    #[test]
    fn round_trips_through_name() {
        for variant in TreeVariant::ALL {
            assert_eq!(variant.name().parse::<TreeVariant>().unwrap(), variant);
        }
    }
}
