use std::convert::Infallible;

use crate::{traits::CostFunction, Float};

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
pub struct Rosenbrock {
    /// The number of dimensions of the function (must be >= 2).
    pub n: usize,
}
impl CostFunction for Rosenbrock {
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok(x[..self.n]
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0].powi(2)).powi(2) + (1.0 - w[0]).powi(2))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;

    use super::*;
    use crate::algorithms::particles::PSO;

    #[test]
    fn test_rosenbrock() {
        let f = Rosenbrock { n: 2 };
        assert_eq!(f.evaluate(&[1.0, 1.0], &mut ()).unwrap(), 0.0);
        assert_eq!(f.evaluate(&[0.0, 0.0], &mut ()).unwrap(), 1.0);
        assert_eq!(f.evaluate(&[-1.0, 1.0], &mut ()).unwrap(), 4.0);
    }

    #[test]
    fn test_pso_rosenbrock() {
        let mut pso = PSO::new(2, Rng::with_seed(0));
        pso.configure(|c| {
            c.with_n_particles(40)
                .with_iterations(300)
                .with_position_bounds([(-2.0, 2.0), (-2.0, 2.0)])
                .with_velocity_bounds([(-0.5, 0.5), (-0.5, 0.5)])
        });
        let summary = pso.run(&Rosenbrock { n: 2 }, &mut ()).unwrap();
        assert!(summary.best_score < 1e-1);
    }
}
