//! Bounding volumes for tree nodes.
//!
//! A bound must contain every point owned by its node's subtree, and its
//! distance functions must be exact under the Euclidean metric: the true
//! distance between any point in one bound and any point in another always
//! lies between the reported minimum and maximum. This is the single piece
//! of variant-specific knowledge the traversal strategies need.

use distances::number::Float;
use serde::{Deserialize, Serialize};

use crate::utils::NumberExt;
use crate::PointSet;

/// A shape guaranteed to contain all points in a tree node's subtree.
pub trait Bound: Clone + core::fmt::Debug + Send + Sync {
    /// The type of the distance values.
    type Dist: Float;

    /// The smallest bound containing the given points.
    ///
    /// `indices` must not be empty.
    fn from_points(data: &PointSet<Self::Dist>, indices: &[usize]) -> Self;

    /// A lower bound on the distance from any contained point to `query`.
    fn min_to_point(&self, query: &[Self::Dist]) -> Self::Dist;

    /// An upper bound on the distance from any contained point to `query`.
    fn max_to_point(&self, query: &[Self::Dist]) -> Self::Dist;

    /// A lower bound on the distance between any point in `self` and any
    /// point in `other`.
    fn min_to_bound(&self, other: &Self) -> Self::Dist;

    /// An upper bound on the distance between any point in `self` and any
    /// point in `other`.
    fn max_to_bound(&self, other: &Self) -> Self::Dist;

    /// Grows `self` until it contains `child`.
    fn expand_to_contain(&mut self, child: &Self);

    /// Whether `other` lies entirely inside `self`.
    fn encloses(&self, other: &Self) -> bool;
}

/// An axis-aligned hyper-rectangle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HyperRect<F: Float> {
    /// The smallest coordinate in every dimension.
    lo: Vec<F>,
    /// The largest coordinate in every dimension.
    hi: Vec<F>,
}

impl<F: Float> HyperRect<F> {
    /// The smallest coordinate in every dimension.
    pub fn lo(&self) -> &[F] {
        &self.lo
    }

    /// The largest coordinate in every dimension.
    pub fn hi(&self) -> &[F] {
        &self.hi
    }

    /// The dimension with the largest extent, along with that extent.
    pub fn widest_dimension(&self) -> (usize, F) {
        self.lo
            .iter()
            .zip(self.hi.iter())
            .enumerate()
            .map(|(d, (&lo, &hi))| (d, hi - lo))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap_or_else(|| unreachable!("a bound always has at least one dimension"))
    }
}

impl<F: Float> Bound for HyperRect<F> {
    type Dist = F;

    fn from_points(data: &PointSet<F>, indices: &[usize]) -> Self {
        let mut lo = vec![F::MAX; data.dimensionality()];
        let mut hi = vec![F::MIN; data.dimensionality()];
        for &i in indices {
            for (d, &x) in data.get(i).iter().enumerate() {
                if x < lo[d] {
                    lo[d] = x;
                }
                if x > hi[d] {
                    hi[d] = x;
                }
            }
        }
        Self { lo, hi }
    }

    fn min_to_point(&self, query: &[F]) -> F {
        self.lo
            .iter()
            .zip(self.hi.iter())
            .zip(query.iter())
            .map(|((&lo, &hi), &q)| {
                let gap = if q < lo {
                    lo - q
                } else if q > hi {
                    q - hi
                } else {
                    F::ZERO
                };
                gap * gap
            })
            .sum::<F>()
            .sqrt()
    }

    fn max_to_point(&self, query: &[F]) -> F {
        self.lo
            .iter()
            .zip(self.hi.iter())
            .zip(query.iter())
            .map(|((&lo, &hi), &q)| {
                let gap = (q - lo).abs().max((hi - q).abs());
                gap * gap
            })
            .sum::<F>()
            .sqrt()
    }

    fn min_to_bound(&self, other: &Self) -> F {
        self.lo
            .iter()
            .zip(self.hi.iter())
            .zip(other.lo.iter().zip(other.hi.iter()))
            .map(|((&s_lo, &s_hi), (&o_lo, &o_hi))| {
                let gap = if o_lo > s_hi {
                    o_lo - s_hi
                } else if s_lo > o_hi {
                    s_lo - o_hi
                } else {
                    F::ZERO
                };
                gap * gap
            })
            .sum::<F>()
            .sqrt()
    }

    fn max_to_bound(&self, other: &Self) -> F {
        self.lo
            .iter()
            .zip(self.hi.iter())
            .zip(other.lo.iter().zip(other.hi.iter()))
            .map(|((&s_lo, &s_hi), (&o_lo, &o_hi))| {
                let gap = (s_hi - o_lo).max(o_hi - s_lo);
                gap * gap
            })
            .sum::<F>()
            .sqrt()
    }

    fn expand_to_contain(&mut self, child: &Self) {
        for (s, &c) in self.lo.iter_mut().zip(child.lo.iter()) {
            if c < *s {
                *s = c;
            }
        }
        for (s, &c) in self.hi.iter_mut().zip(child.hi.iter()) {
            if c > *s {
                *s = c;
            }
        }
    }

    fn encloses(&self, other: &Self) -> bool {
        self.lo.iter().zip(other.lo.iter()).all(|(&s, &o)| s <= o)
            && self.hi.iter().zip(other.hi.iter()).all(|(&s, &o)| o <= s)
    }
}

/// A hypersphere around the centroid of the points.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sphere<F: Float> {
    /// The centroid of the points at construction time.
    center: Vec<F>,
    /// The radius around the center.
    radius: F,
}

impl<F: Float> Sphere<F> {
    /// The center of the sphere.
    pub fn center(&self) -> &[F] {
        &self.center
    }

    /// The radius of the sphere.
    pub fn radius(&self) -> F {
        self.radius
    }
}

impl<F: Float> Bound for Sphere<F> {
    type Dist = F;

    fn from_points(data: &PointSet<F>, indices: &[usize]) -> Self {
        let mut center = vec![F::ZERO; data.dimensionality()];
        for &i in indices {
            for (c, &x) in center.iter_mut().zip(data.get(i).iter()) {
                *c += x;
            }
        }
        let cardinality = F::from(indices.len());
        for c in &mut center {
            *c /= cardinality;
        }

        let radius = indices
            .iter()
            .map(|&i| distances::vectors::euclidean(&center, data.get(i)))
            .max_by(F::total_cmp)
            .unwrap_or(F::ZERO);

        Self { center, radius }
    }

    fn min_to_point(&self, query: &[F]) -> F {
        let d: F = distances::vectors::euclidean(&self.center, query);
        (d - self.radius).max(F::ZERO)
    }

    fn max_to_point(&self, query: &[F]) -> F {
        let d: F = distances::vectors::euclidean(&self.center, query);
        d + self.radius
    }

    fn min_to_bound(&self, other: &Self) -> F {
        let d: F = distances::vectors::euclidean(&self.center, &other.center);
        (d - self.radius - other.radius).max(F::ZERO)
    }

    fn max_to_bound(&self, other: &Self) -> F {
        let d: F = distances::vectors::euclidean(&self.center, &other.center);
        d + self.radius + other.radius
    }

    fn expand_to_contain(&mut self, child: &Self) {
        let d: F = distances::vectors::euclidean(&self.center, &child.center);
        self.radius = self.radius.max(d + child.radius);
    }

    fn encloses(&self, other: &Self) -> bool {
        let d: F = distances::vectors::euclidean(&self.center, &other.center);
        d + other.radius <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, HyperRect, Sphere};
    use crate::PointSet;

    fn unit_square() -> PointSet<f64> {
        PointSet::new(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap()
    }

    #[test]
    fn hyper_rect_point_distances() {
        let data = unit_square();
        let rect = HyperRect::from_points(&data, &[0, 1, 2, 3]);

        // A point inside the rectangle.
        assert_eq!(rect.min_to_point(&[0.5, 0.5]), 0.0);

        // A point directly to the right of the rectangle.
        assert_eq!(rect.min_to_point(&[3.0, 0.5]), 2.0);
        let max = rect.max_to_point(&[3.0, 0.5]);
        assert!((max - (9.0_f64 + 0.25).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn hyper_rect_bound_distances() {
        let data = PointSet::new(vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![4.0, 0.0], vec![5.0, 1.0]]).unwrap();
        let left = HyperRect::from_points(&data, &[0, 1]);
        let right = HyperRect::from_points(&data, &[2, 3]);

        assert_eq!(left.min_to_bound(&right), 3.0);
        let max = left.max_to_bound(&right);
        assert!((max - 26.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sphere_distances() {
        let data = unit_square();
        let sphere = Sphere::from_points(&data, &[0, 1, 2, 3]);

        assert_eq!(sphere.center(), &[0.5, 0.5]);
        assert!((sphere.radius() - 0.5_f64.sqrt()).abs() < 1e-12);

        assert_eq!(sphere.min_to_point(&[0.5, 0.5]), 0.0);
        let min = sphere.min_to_point(&[3.0, 0.5]);
        assert!((min - (2.5 - 0.5_f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn expansion_preserves_containment() {
        let data = PointSet::new(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![10.0, 0.0], vec![11.0, 0.0]]).unwrap();
        let mut parent = Sphere::from_points(&data, &[0, 1]);
        let child = Sphere::from_points(&data, &[2, 3]);

        assert!(!parent.encloses(&child));
        parent.expand_to_contain(&child);
        assert!(parent.encloses(&child));
    }
}
