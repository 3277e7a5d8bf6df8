use std::convert::Infallible;

use crate::{traits::CostFunction, Float};

/// The Sphere function, a convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^n x_i^2
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
#[derive(Default, Clone, Copy, Debug)]
pub struct Sphere;
impl CostFunction for Sphere {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x.iter().map(|xi| xi.powi(2)).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere() {
        assert_eq!(Sphere.evaluate(&[0.0, 0.0, 0.0], &mut ()).unwrap(), 0.0);
        assert_eq!(Sphere.evaluate(&[1.0, -2.0], &mut ()).unwrap(), 5.0);
    }
}
