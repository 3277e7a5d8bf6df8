/// Implementation of Particle Swarm Optimization (PSO) algorithm
pub mod pso;
pub use pso::{PSOConfig, PSO};

/// [`Swarm`] type for swarm-based optimizers.
pub mod swarm;
pub use swarm::{Swarm, SwarmParticle, SwarmUpdateMethod};

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;

use std::{ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{core::Point, traits::Observer};

/// An [`Observer`] which stores the swarm particles' history as well as the
/// history of global best positions.
///
/// One entry is recorded for the initial swarm and one for every completed iteration.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct TrackingSwarmObserver {
    /// The history of the swarm particles
    pub history: Vec<Vec<SwarmParticle>>,
    /// The history of the best position in the swarm
    pub best_history: Vec<Point>,
}

impl TrackingSwarmObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<U> Observer<U> for TrackingSwarmObserver {
    fn callback(
        &mut self,
        _step: usize,
        status: &mut SwarmStatus,
        _user_data: &mut U,
    ) -> ControlFlow<()> {
        self.history.push(status.swarm.particles.clone());
        self.best_history.push(status.get_best());
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;

    use super::*;
    use crate::{core::NopAbortSignal, test_functions::Sphere};

    #[test]
    fn test_tracking_observer_records_every_step() {
        let mut pso = PSO::new(2, Rng::with_seed(0));
        pso.configure(|c| {
            c.with_n_particles(4)
                .with_iterations(6)
                .with_position_bounds([(-2.0, 2.0), (-2.0, 2.0)])
                .with_velocity_bounds([(-0.5, 0.5), (-0.5, 0.5)])
        });
        let tracker = TrackingSwarmObserver::build();
        let mut status = SwarmStatus::default();
        pso.process(
            &Sphere,
            &mut (),
            &mut status,
            &[tracker.clone()],
            &NopAbortSignal,
        )
        .unwrap();
        let tracker = tracker.read();
        assert_eq!(tracker.history.len(), 7);
        assert_eq!(tracker.best_history.len(), 7);
        assert!(tracker.history.iter().all(|swarm| swarm.len() == 4));
        for (best, fx) in tracker.best_history.iter().zip(&status.history) {
            assert_eq!(best.fx_or_inf(), *fx);
        }
    }
}
