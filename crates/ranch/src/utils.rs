//! Small numeric helpers used across the crate.

use distances::{number::Float, Number};

/// Total-ordering and clamping helpers for [`Number`]s.
///
/// These mirror the `total_cmp`/`min`/`max` methods that the `distances`
/// crate's `Number` trait exposes; they are provided here as a thin
/// compatibility shim so the crate builds against a `distances` release
/// whose `Number` trait omits them. Ordering is computed through the
/// lossless `as_f64` widening, which preserves the ordering of every
/// finite value the crate works with.
pub trait NumberExt: Number {
    /// A total ordering of two numbers.
    fn total_cmp(&self, other: &Self) -> core::cmp::Ordering;

    /// The smaller of two numbers.
    #[must_use]
    fn min(self, other: Self) -> Self;

    /// The larger of two numbers.
    #[must_use]
    fn max(self, other: Self) -> Self;
}

impl<T: Number> NumberExt for T {
    fn total_cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.clone().as_f64().total_cmp(&other.clone().as_f64())
    }

    fn min(self, other: Self) -> Self {
        if self.clone().as_f64() < other.clone().as_f64() {
            self
        } else {
            other
        }
    }

    fn max(self, other: Self) -> Self {
        if self.clone().as_f64() > other.clone().as_f64() {
            self
        } else {
            other
        }
    }
}

/// Returns the index and value of the maximum element, or `None` if the
/// slice is empty.
pub fn arg_max<T: Number>(values: &[T]) -> Option<(usize, T)> {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, &v)| (i, v))
}

/// The dot product of two slices, zipped to the shorter length.
pub fn dot<F: Float>(a: &[F], b: &[F]) -> F {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    #[test]
    fn arg_max() {
        assert_eq!(super::arg_max::<f32>(&[]), None);
        assert_eq!(super::arg_max(&[1.0, 3.0, 2.0]), Some((1, 3.0)));
    }

    #[test]
    fn dot() {
        assert_eq!(super::dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }
}
