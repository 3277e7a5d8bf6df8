use crate::{
    core::utils::SampleFloat,
    error::{BoundsKind, ConfigError},
    DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

/// A closed interval `[lower, upper]` which a single coordinate is confined to.
///
/// [`Bound`]s are not checked on construction; a list of them is validated as a whole by
/// [`Bounds::validate`] before a run starts, so that inverted or non-finite limits are reported
/// as a [`ConfigError`] instead of a panic.
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bound {
    lower: Float,
    upper: Float,
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        Self::new(value.0, value.1)
    }
}
impl From<&(Float, Float)> for Bound {
    fn from(value: &(Float, Float)) -> Self {
        Self::new(value.0, value.1)
    }
}
impl From<&Self> for Bound {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl Bound {
    /// Create a new bound between `lower` and `upper` (inclusive).
    pub const fn new(lower: Float, upper: Float) -> Self {
        Self { lower, upper }
    }
    /// Returns the lower limit.
    pub const fn lower(&self) -> Float {
        self.lower
    }
    /// Returns the upper limit.
    pub const fn upper(&self) -> Float {
        self.upper
    }
    /// Get a value in the uniform distribution between `lower` and `upper`.
    ///
    /// A degenerate bound (`lower == upper`) always yields `lower`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        rng.range(self.lower, self.upper)
    }
    /// Checks whether the given `value` is inside the bound.
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Projects `value` onto the bound: first raised to `lower`, then lowered to `upper`.
    pub fn clamp(&self, value: Float) -> Float {
        value.max(self.lower).min(self.upper)
    }
    /// Checks if the given value sits exactly on one of the limits.
    pub fn at_bound(&self, value: Float) -> bool {
        value == self.lower || value == self.upper
    }
    /// Returns the width of the interval.
    pub fn width(&self) -> Float {
        self.upper - self.lower
    }
}

/// A list of [`Bound`]s, one per dimension, describing a box.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Build a box from separate lists of lower and upper limits.
    ///
    /// If the lists differ in length, the missing limits of the shorter one are filled with NaN,
    /// so [`Bounds::validate`] reports the first incomplete index as a
    /// [`ConfigError::NonFiniteBound`].
    pub fn from_limits(lower: &[Float], upper: &[Float]) -> Self {
        (0..lower.len().max(upper.len()))
            .map(|i| {
                Bound::new(
                    lower.get(i).copied().unwrap_or(Float::NAN),
                    upper.get(i).copied().unwrap_or(Float::NAN),
                )
            })
            .collect()
    }
    /// Returns the inner Vector of bounds.
    pub fn into_inner(self) -> Vec<Bound> {
        self.0
    }
    /// Returns the lower limits of every dimension.
    pub fn lower(&self) -> Vec<Float> {
        self.iter().map(Bound::lower).collect()
    }
    /// Returns the upper limits of every dimension.
    pub fn upper(&self) -> Vec<Float> {
        self.iter().map(Bound::upper).collect()
    }
    /// Check that there is one finite, non-inverted bound for each of `dimension` coordinates.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::DimensionMismatch`] if the number of bounds is not `dimension`,
    /// a [`ConfigError::NonFiniteBound`] if a limit is infinite or NaN, and a
    /// [`ConfigError::InvertedBound`] if a lower limit exceeds its upper limit.
    pub fn validate(&self, kind: BoundsKind, dimension: usize) -> Result<(), ConfigError> {
        if self.len() != dimension {
            return Err(ConfigError::DimensionMismatch {
                kind,
                expected: dimension,
                got: self.len(),
            });
        }
        for (index, bound) in self.iter().enumerate() {
            if !bound.lower.is_finite() || !bound.upper.is_finite() {
                return Err(ConfigError::NonFiniteBound { kind, index });
            }
            if bound.lower > bound.upper {
                return Err(ConfigError::InvertedBound {
                    kind,
                    index,
                    lower: bound.lower,
                    upper: bound.upper,
                });
            }
        }
        Ok(())
    }
    /// Clamp every component of `values` into its bound in place.
    pub fn clamp(&self, values: &mut DVector<Float>) {
        values
            .iter_mut()
            .zip(self.iter())
            .for_each(|(v, b)| *v = b.clamp(*v));
    }
    /// Checks whether every component of `values` lies within its bound.
    pub fn contains(&self, values: &[Float]) -> bool {
        values.len() == self.len() && values.iter().zip(self.iter()).all(|(v, b)| b.contains(*v))
    }
    /// Draw a vector uniformly from the box, one coordinate after another.
    pub fn random_vector(&self, rng: &mut Rng) -> DVector<Float> {
        DVector::from_iterator(self.len(), self.iter().map(|b| b.get_uniform(rng)))
    }
}

impl<B: Into<Bound>> FromIterator<B> for Bounds {
    fn from_iter<T: IntoIterator<Item = B>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(value: Vec<Bound>) -> Self {
        Self(value)
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bounds {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn sample_bounds() -> Bounds {
        vec![(0.0, 1.0), (-2.0, 2.0), (10.0, 100.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_bound_contains_and_clamp() {
        let b = Bound::new(-1.0, 1.0);
        assert!(b.contains(0.0));
        assert!(b.contains(-1.0));
        assert!(!b.contains(1.5));
        assert_eq!(b.clamp(1.5), 1.0);
        assert_eq!(b.clamp(-3.0), -1.0);
        assert_eq!(b.clamp(0.25), 0.25);
    }

    #[test]
    fn test_bound_lower_upper_at_bound() {
        let b: Bound = (-2.0, 3.0).into();
        assert_eq!(b.lower(), -2.0);
        assert_eq!(b.upper(), 3.0);
        assert_eq!(b.width(), 5.0);
        assert!(b.at_bound(-2.0));
        assert!(b.at_bound(3.0));
        assert!(!b.at_bound(0.0));
        assert_eq!(b.to_string(), "[-2, 3]");
    }

    #[test]
    fn test_degenerate_bound_sampling() {
        let mut rng = Rng::with_seed(0);
        let b = Bound::new(4.0, 4.0);
        for _ in 0..10 {
            assert_eq!(b.get_uniform(&mut rng), 4.0);
        }
    }

    #[test]
    fn test_bounds_random_vector_is_inside() {
        let mut rng = Rng::with_seed(0);
        let bounds = sample_bounds();
        for _ in 0..100 {
            let v = bounds.random_vector(&mut rng);
            assert_eq!(v.len(), 3);
            assert!(bounds.contains(v.as_slice()));
        }
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = sample_bounds();
        let mut v = dvector![-1.0, 0.5, 200.0];
        bounds.clamp(&mut v);
        assert_eq!(v, dvector![0.0, 0.5, 100.0]);
        assert!(bounds.contains(v.as_slice()));
    }

    #[test]
    fn test_bounds_validate() {
        let bounds = sample_bounds();
        assert!(bounds.validate(BoundsKind::Position, 3).is_ok());
        assert_eq!(
            bounds.validate(BoundsKind::Position, 2),
            Err(ConfigError::DimensionMismatch {
                kind: BoundsKind::Position,
                expected: 2,
                got: 3
            })
        );
        let inverted = Bounds::from_limits(&[5.0], &[0.0]);
        assert_eq!(
            inverted.validate(BoundsKind::Position, 1),
            Err(ConfigError::InvertedBound {
                kind: BoundsKind::Position,
                index: 0,
                lower: 5.0,
                upper: 0.0
            })
        );
        let infinite = Bounds::from_limits(&[0.0, Float::NEG_INFINITY], &[1.0, 1.0]);
        assert_eq!(
            infinite.validate(BoundsKind::Velocity, 2),
            Err(ConfigError::NonFiniteBound {
                kind: BoundsKind::Velocity,
                index: 1
            })
        );
    }

    #[test]
    fn test_bounds_from_limits_and_accessors() {
        let bounds = Bounds::from_limits(&[0.0, 0.0, 10.0], &[100.0, 100.0, 100.0]);
        assert_eq!(bounds.lower(), vec![0.0, 0.0, 10.0]);
        assert_eq!(bounds.upper(), vec![100.0, 100.0, 100.0]);
        assert_eq!(bounds.clone().into_inner().len(), 3);
        assert!(!bounds.contains(&[1.0, 1.0]));

        let ragged = Bounds::from_limits(&[0.0, 0.0], &[1.0]);
        assert_eq!(ragged.len(), 2);
        assert_eq!(
            ragged.validate(BoundsKind::Position, 2),
            Err(ConfigError::NonFiniteBound {
                kind: BoundsKind::Position,
                index: 1
            })
        );
    }
}
