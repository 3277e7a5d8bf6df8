use std::convert::Infallible;

use crate::{core::Bounds, traits::CostFunction, Float, PI};

/// The pressure vessel design problem, a constrained engineering benchmark.
///
/// The parameters are the shell thickness $`x_1`$, the head thickness $`x_2`$, the inner radius
/// $`x_3`$ and the length of the cylindrical section $`x_4`$. A design is feasible when
///
/// ```math
/// \begin{aligned}
/// g_1 &= -x_1 + 0.0193 x_3 \leq 0 \\
/// g_2 &= -x_2 + 0.00954 x_3 \leq 0 \\
/// g_3 &= -\pi x_3^2 - \tfrac{4}{3}\pi x_3^3 + 1296000 \leq 0 \\
/// g_4 &= x_4 - 240 \leq 0
/// \end{aligned}
/// ```
/// in which case its cost is
///
/// ```math
/// f(\vec{x}) = 0.6224 x_1 x_3 x_4 + 1.7781 x_2 x_3^2 + 3.1661 x_1^2 x_4 + 19.84 x_1^2 x_3
/// ```
/// Infeasible designs score [`PressureVessel::PENALTY`]. So does any `x` which does not have
/// exactly four components, so a swarm of the wrong dimension gets the penalty everywhere
/// instead of indexing out of bounds.
#[derive(Default, Clone, Copy, Debug)]
pub struct PressureVessel;

impl PressureVessel {
    /// The score of every infeasible design.
    pub const PENALTY: Float = 1e10;

    /// The usual search box, $`[0, 100]^2 \times [10, 100]^2`$.
    pub fn default_bounds() -> Bounds {
        Bounds::from_limits(&[0.0, 0.0, 10.0, 10.0], &[100.0, 100.0, 100.0, 100.0])
    }

    /// Returns `true` if `x` has four components and every constraint is satisfied at it.
    pub fn is_feasible(x: &[Float]) -> bool {
        let &[x1, x2, x3, x4] = x else {
            return false;
        };
        let g1 = -x1 + 0.0193 * x3;
        let g2 = -x2 + 0.00954 * x3;
        let g3 = -PI * x3.powi(2) - 4.0 * PI * x3.powi(3) / 3.0 + 1_296_000.0;
        let g4 = x4 - 240.0;
        g1 <= 0.0 && g2 <= 0.0 && g3 <= 0.0 && g4 <= 0.0
    }
}

impl CostFunction for PressureVessel {
    #[allow(clippy::suboptimal_flops)]
    fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        let &[x1, x2, x3, x4] = x else {
            return Ok(Self::PENALTY);
        };
        if !Self::is_feasible(x) {
            return Ok(Self::PENALTY);
        }
        Ok(0.6224 * x1 * x3 * x4
            + 1.7781 * x2 * x3.powi(2)
            + 3.1661 * x1.powi(2) * x4
            + 19.84 * x1.powi(2) * x3)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use fastrand::Rng;

    use super::*;
    use crate::algorithms::particles::PSO;

    #[test]
    fn test_infeasible_designs_are_penalized() {
        // g1 > 0: shell too thin for the radius
        assert_eq!(
            PressureVessel.evaluate(&[0.0, 50.0, 50.0, 50.0], &mut ()).unwrap(),
            PressureVessel::PENALTY
        );
        // g3 > 0: radius too small for the volume
        assert_eq!(
            PressureVessel.evaluate(&[10.0, 10.0, 10.0, 50.0], &mut ()).unwrap(),
            PressureVessel::PENALTY
        );
    }

    #[test]
    fn test_wrong_dimension_is_penalized() {
        assert!(!PressureVessel::is_feasible(&[2.0, 1.0, 100.0]));
        assert_eq!(
            PressureVessel.evaluate(&[2.0, 1.0], &mut ()).unwrap(),
            PressureVessel::PENALTY
        );
        assert_eq!(
            PressureVessel
                .evaluate(&[2.0, 1.0, 100.0, 10.0, 0.0], &mut ())
                .unwrap(),
            PressureVessel::PENALTY
        );

        let mut pso = PSO::new(2, Rng::with_seed(0));
        pso.configure(|c| {
            c.with_n_particles(5)
                .with_iterations(3)
                .with_position_bounds([(0.0, 100.0), (0.0, 100.0)])
                .with_velocity_bounds([(-2.0, 2.0), (-2.0, 2.0)])
        });
        let summary = pso.run(&PressureVessel, &mut ()).unwrap();
        assert_eq!(summary.best_score, PressureVessel::PENALTY);
    }

    #[test]
    fn test_feasible_design_cost() {
        let x = [2.0, 1.0, 100.0, 10.0];
        assert!(PressureVessel::is_feasible(&x));
        let expected = 0.6224 * 2000.0 + 1.7781 * 10_000.0 + 3.1661 * 40.0 + 19.84 * 400.0;
        assert_relative_eq!(
            PressureVessel.evaluate(&x, &mut ()).unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_default_bounds() {
        let bounds = PressureVessel::default_bounds();
        assert_eq!(bounds.lower(), vec![0.0, 0.0, 10.0, 10.0]);
        assert_eq!(bounds.upper(), vec![100.0; 4]);
    }

    #[test]
    fn test_pso_finds_feasible_design() {
        let mut pso = PSO::new(4, Rng::with_seed(0));
        pso.configure(|c| {
            c.with_position_bounds(PressureVessel::default_bounds().into_inner())
                .with_velocity_limits(&[-2.0; 4], &[2.0; 4])
        });
        let summary = pso.run(&PressureVessel, &mut ()).unwrap();
        assert_eq!(summary.history.len(), 501);
        assert!(summary.best_score < PressureVessel::PENALTY);
        assert!(PressureVessel::is_feasible(&summary.best_position));
        assert!(PressureVessel::default_bounds().contains(&summary.best_position));
    }
}
