//! A `PointSet` is an ordered, fixed-size collection of d-dimensional points.

use distances::number::Float;
use serde::{Deserialize, Serialize};

use crate::RangeSearchError;

/// An ordered collection of d-dimensional points.
///
/// A `PointSet` is immutable once handed to the engine: queries never
/// mutate it, and rebuilding an index produces a new model rather than
/// changing the points in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointSet<F: Float> {
    /// The points, one `Vec` per point.
    points: Vec<Vec<F>>,
    /// The number of coordinates in every point.
    dimensionality: usize,
    /// The name of the point set.
    name: String,
}

impl<F: Float> PointSet<F> {
    /// Creates a new `PointSet` from a list of points.
    ///
    /// # Errors
    ///
    /// * If `points` is empty.
    /// * If the points have zero dimensions.
    /// * If the points do not all have the same dimensionality.
    pub fn new(points: Vec<Vec<F>>) -> Result<Self, RangeSearchError> {
        let dimensionality = points
            .first()
            .ok_or_else(|| RangeSearchError::Dataset("the point set is empty".to_string()))?
            .len();
        if dimensionality == 0 {
            return Err(RangeSearchError::Dataset("points must have at least one coordinate".to_string()));
        }
        if let Some(i) = points.iter().position(|p| p.len() != dimensionality) {
            return Err(RangeSearchError::Dataset(format!(
                "point {i} has {} coordinates but the first point has {dimensionality}",
                points[i].len()
            )));
        }
        Ok(Self {
            points,
            dimensionality,
            name: "unnamed".to_string(),
        })
    }

    /// Creates a new `PointSet` from a column-major matrix, i.e. one row per
    /// coordinate and one column per point.
    ///
    /// # Errors
    ///
    /// * If the matrix is empty or its rows have unequal lengths.
    pub fn from_columns(rows: Vec<Vec<F>>) -> Result<Self, RangeSearchError> {
        let cardinality = rows
            .first()
            .ok_or_else(|| RangeSearchError::Dataset("the matrix is empty".to_string()))?
            .len();
        if rows.iter().any(|r| r.len() != cardinality) {
            return Err(RangeSearchError::Dataset(
                "the rows of the matrix have unequal lengths".to_string(),
            ));
        }
        let points = (0..cardinality)
            .map(|c| rows.iter().map(|r| r[c]).collect())
            .collect();
        Self::new(points)
    }

    /// Changes the name of the point set.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// The name of the point set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of points.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.points.len()
    }

    /// The number of coordinates in every point.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// The point at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> &Vec<F> {
        &self.points[index]
    }

    /// A single coordinate of a single point.
    #[must_use]
    pub fn coordinate(&self, index: usize, dim: usize) -> F {
        self.points[index][dim]
    }

    /// All points, in their original order.
    #[must_use]
    pub fn points(&self) -> &[Vec<F>] {
        &self.points
    }
}
