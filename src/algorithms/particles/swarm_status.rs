use crate::{algorithms::particles::Swarm, core::Point, Float};
use serde::{Deserialize, Serialize};

/// The state of a particle swarm run, updated in place after every iteration.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The global best position found by all particles
    pub gbest: Point,
    /// The value of the global best after initialization and after every completed iteration
    pub history: Vec<Float>,
    /// A message containing information about the condition of the swarm
    pub message: String,
    /// The swarm
    pub swarm: Swarm,
    /// The number of function evaluations
    pub n_f_evals: usize,
}

impl SwarmStatus {
    /// Get a copy of the global best position found by the swarm.
    pub fn get_best(&self) -> Point {
        self.gbest.clone()
    }
    /// The number of completed iterations (not counting initialization).
    pub fn iterations(&self) -> usize {
        self.history.len().saturating_sub(1)
    }
    /// Resets the status to its default state. This is called at the beginning of every run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
    /// Sets the message of the run.
    pub fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_and_iterations() {
        let mut status = SwarmStatus {
            gbest: Point::from(vec![1.0]),
            history: vec![3.0, 2.0, 1.0],
            message: "Running".to_string(),
            swarm: Swarm::default(),
            n_f_evals: 12,
        };
        assert_eq!(status.iterations(), 2);
        status.reset();
        assert_eq!(status.iterations(), 0);
        assert_eq!(status.n_f_evals, 0);
        assert!(status.message.is_empty());
        status.update_message("Initialized");
        assert_eq!(status.message, "Initialized");
    }
}
