//! The closed distance interval that defines a range query.

use distances::number::Float;
use serde::{Deserialize, Serialize};

use crate::RangeSearchError;

/// A closed interval `[min, max]` of distances.
///
/// Both endpoints are included: a reference point at distance exactly `min`
/// or exactly `max` from a query is a match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval<F: Float> {
    /// The lower endpoint.
    min: F,
    /// The upper endpoint.
    max: F,
}

impl<F: Float> Interval<F> {
    /// Creates a new `Interval`.
    ///
    /// # Errors
    ///
    /// * If either endpoint is NaN.
    /// * If `min` is negative.
    /// * If `max` is less than `min`.
    pub fn new(min: F, max: F) -> Result<Self, RangeSearchError> {
        // NaN is the only value that is not equal to itself.
        if min != min || max != max {
            Err(RangeSearchError::InvalidRange("endpoints may not be NaN".to_string()))
        } else if min < F::ZERO {
            Err(RangeSearchError::InvalidRange(format!(
                "min must be non-negative but was {min}"
            )))
        } else if max < min {
            Err(RangeSearchError::InvalidRange(format!(
                "max ({max}) must be at least min ({min})"
            )))
        } else {
            Ok(Self { min, max })
        }
    }

    /// The lower endpoint.
    pub fn min(&self) -> F {
        self.min
    }

    /// The upper endpoint.
    pub fn max(&self) -> F {
        self.max
    }

    /// Whether `d` lies inside the interval.
    pub fn contains(&self, d: F) -> bool {
        self.min <= d && d <= self.max
    }
}
