use std::{ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;

use crate::{algorithms::particles::SwarmStatus, traits::Observer};

/// A debugging observer which logs the step, the global best, and the number of function
/// evaluations at every iteration through [`tracing`].
///
/// # Usage:
///
/// ```rust
/// use fastrand::Rng;
/// use swarmfit::prelude::*;
/// use swarmfit::observers::DebugObserver;
/// use swarmfit::test_functions::Rosenbrock;
///
/// let mut engine: Engine<()> = Engine::new(PSO::new(2, Rng::with_seed(1))).setup(|e| {
///     e.configure(|c| {
///         c.with_n_particles(10)
///             .with_iterations(5)
///             .with_position_bounds([(-2.0, 2.0), (-2.0, 2.0)])
///             .with_velocity_bounds([(-0.5, 0.5), (-0.5, 0.5)])
///     })
///     .with_observer(DebugObserver::build())
/// });
/// engine.minimize(&Rosenbrock { n: 2 }).unwrap();
/// // ^ This will log a message for each step when a subscriber is installed
/// assert_eq!(engine.result.iterations, 5);
/// ```
#[derive(Default, Clone, Copy, Debug)]
pub struct DebugObserver;

impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}

impl<U> Observer<U> for DebugObserver {
    fn callback(
        &mut self,
        step: usize,
        status: &mut SwarmStatus,
        _user_data: &mut U,
    ) -> ControlFlow<()> {
        tracing::info!(
            step,
            best_score = status.gbest.fx_or_inf(),
            best_position = ?status.gbest.x.as_slice(),
            n_f_evals = status.n_f_evals,
            "swarm progress"
        );
        ControlFlow::Continue(())
    }
}
