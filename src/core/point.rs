use crate::{traits::CostFunction, DVector, Float};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Describes a point in parameter space together with its (cached) function value.
///
/// Points are plain values: copying one into a "best" slot clones the coordinates, so later
/// moves of the particle it came from cannot alter the recorded best.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}
impl Point {
    /// Convert the [`Point`] into a coordinate-value tuple.
    ///
    /// Unevaluated points report `+inf`.
    pub fn destructure(self) -> (DVector<Float>, Float) {
        let fx = self.fx_or_inf();
        (self.x, fx)
    }
    /// The number of coordinates of the point.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// Move the point to a new position, resetting the evaluation of the point
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }
    /// Get the current evaluation of the point, or `+inf` if it has not been evaluated.
    pub fn fx_or_inf(&self) -> Float {
        self.fx.unwrap_or(Float::INFINITY)
    }
    /// Returns `true` if this point is strictly better (lower) than `other`.
    ///
    /// Equal values are never better, so ties keep whichever point was recorded first. NaN and
    /// unevaluated points rank below every real value and are never better than anything.
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (self.fx, other.fx) {
            (Some(s), _) if s.is_nan() => false,
            (Some(s), Some(o)) => s < o || o.is_nan(),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
    /// Evaluate the given function at the point's coordinate and set the `fx` value to the
    /// result. Points which already carry a value are not re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        if self.fx.is_none() {
            self.fx = Some(func.evaluate(self.x.as_slice(), user_data)?);
        }
        Ok(())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: {:?}, f(x): {:?}", self.x.as_slice(), self.fx)
    }
}

impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_functions::Sphere;
    use nalgebra::dvector;
    use std::cell::Cell;
    use std::convert::Infallible;

    #[test]
    fn test_destructure() {
        let p = Point {
            x: dvector![1.0, 2.0],
            fx: Some(5.0),
        };
        let (x, fx) = p.clone().destructure();
        assert_eq!(x, dvector![1.0, 2.0]);
        assert_eq!(fx, 5.0);
        assert_eq!(p.dimension(), 2);
        assert_eq!(Point::from(vec![1.0]).fx_or_inf(), Float::INFINITY);
    }

    #[test]
    fn test_evaluate_sets_fx_once() {
        struct Counting(Cell<usize>);
        impl CostFunction for Counting {
            fn evaluate(&self, x: &[Float], _: &mut ()) -> Result<Float, Infallible> {
                self.0.set(self.0.get() + 1);
                Ok(x[0])
            }
        }
        let f = Counting(Cell::new(0));
        let mut p = Point::from(vec![3.0]);
        p.evaluate(&f, &mut ()).unwrap();
        p.evaluate(&f, &mut ()).unwrap();
        assert_eq!(p.fx, Some(3.0));
        assert_eq!(f.0.get(), 1);
    }

    #[test]
    fn test_is_better_than_is_strict() {
        let a = Point {
            x: dvector![1.0],
            fx: Some(1.0),
        };
        let b = Point {
            x: dvector![2.0],
            fx: Some(1.0),
        };
        let c = Point {
            x: dvector![3.0],
            fx: Some(0.5),
        };
        let unevaluated = Point::from(vec![0.0]);
        let nan = Point {
            x: dvector![0.0],
            fx: Some(Float::NAN),
        };
        assert!(!a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
        assert!(c.is_better_than(&a));
        assert!(a.is_better_than(&unevaluated));
        assert!(!unevaluated.is_better_than(&a));
        assert!(!nan.is_better_than(&a));
        assert!(!nan.is_better_than(&unevaluated));
        assert!(a.is_better_than(&nan));
    }

    #[test]
    fn test_set_position_resets_fx() {
        let mut p = Point::from(vec![1.0, 1.0]);
        p.evaluate(&Sphere, &mut ()).unwrap();
        assert_eq!(p.fx, Some(2.0));
        p.set_position(dvector![0.0, 0.0]);
        assert!(p.fx.is_none());
        p.evaluate(&Sphere, &mut ()).unwrap();
        assert_eq!(p.fx, Some(0.0));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut p = Point::from(vec![1.0, 2.0]);
        let snapshot = p.clone();
        p.x[0] = 10.0;
        assert_eq!(snapshot.x, dvector![1.0, 2.0]);
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Point::from(vec![1.0, 2.0]));
        assert!(s.contains("x:"));
        assert!(s.contains("f(x):"));
    }
}
