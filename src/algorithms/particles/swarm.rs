use crate::{
    core::{Bounds, Point},
    traits::CostFunction,
    DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// A swarm of particles used in particle swarm optimization.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Swarm {
    /// A list of the particles in the swarm
    pub particles: Vec<SwarmParticle>,
    /// The update method used by the swarm
    pub update_method: SwarmUpdateMethod,
}

impl Swarm {
    /// Create `n_particles` particles with positions drawn uniformly from `position_bounds`
    /// and velocities drawn uniformly from `velocity_bounds`, and evaluate each one.
    ///
    /// Particles are created in index order. For each particle, every position coordinate is
    /// drawn before any velocity coordinate, so a seeded [`Rng`] always yields the same swarm.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn initialize<U, E>(
        &mut self,
        rng: &mut Rng,
        n_particles: usize,
        position_bounds: &Bounds,
        velocity_bounds: &Bounds,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        self.particles = (0..n_particles)
            .map(|_| {
                let position = position_bounds.random_vector(rng);
                let velocity = velocity_bounds.random_vector(rng);
                SwarmParticle::new(position, velocity, func, user_data)
            })
            .collect::<Result<Vec<SwarmParticle>, E>>()?;
        Ok(())
    }
    /// Index of the particle with the lowest personal best, taking the first one on ties.
    ///
    /// Returns `None` for an empty swarm.
    pub fn index_of_best(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, particle) in self.particles.iter().enumerate() {
            match best {
                Some(b) if !particle.best.is_better_than(&self.particles[b].best) => {}
                _ => best = Some(i),
            }
        }
        best
    }
    /// The number of particles in the swarm.
    pub fn len(&self) -> usize {
        self.particles.len()
    }
    /// Returns `true` if the swarm holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// The algorithmic method to update the swarm positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmUpdateMethod {
    /// Move particles one after another and update the global best as soon as any particle
    /// improves on it, so later particles in the same iteration already follow the new best.
    #[default]
    Asynchronous,
    /// Hold the global best fixed while every particle moves, then update it once at the end
    /// of the iteration. All particles in an iteration see the previous iteration's best.
    Synchronous,
}

/// A particle with a position, velocity, and best known position
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmParticle {
    /// The position of the particle
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point,
}
impl SwarmParticle {
    /// Create a new particle with the given position and velocity, evaluating the cost
    /// function at the position to seed the personal best.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn new<U, E>(
        position: DVector<Float>,
        velocity: DVector<Float>,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<Self, E> {
        let mut position = Point::from(position);
        position.evaluate(func, user_data)?;
        Ok(Self {
            best: position.clone(),
            position,
            velocity,
        })
    }
    /// Apply the velocity update rule
    ///
    /// ```math
    /// v \leftarrow \omega v + c_1 r_1 (p - x) + c_2 r_2 (g - x)
    /// ```
    /// where $`p`$ is the particle's personal best and $`g`$ is `social_best`, then clamp the
    /// result into `velocity_bounds`.
    #[allow(clippy::too_many_arguments)]
    pub fn update_velocity(
        &mut self,
        omega: Float,
        c1: Float,
        c2: Float,
        r1: Float,
        r2: Float,
        social_best: &DVector<Float>,
        velocity_bounds: &Bounds,
    ) {
        let x = &self.position.x;
        self.velocity = self.velocity.scale(omega)
            + (&self.best.x - x).scale(c1 * r1)
            + (social_best - x).scale(c2 * r2);
        velocity_bounds.clamp(&mut self.velocity);
    }
    /// Move the particle by its velocity, clamp it into `position_bounds`, and evaluate the
    /// cost function at the new position.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn update_position<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        position_bounds: &Bounds,
    ) -> Result<(), E> {
        let mut new_position = &self.position.x + &self.velocity;
        position_bounds.clamp(&mut new_position);
        self.position.set_position(new_position);
        self.position.evaluate(func, user_data)
    }
    /// Copy the current position into the personal best if it is strictly better.
    ///
    /// Returns `true` if the personal best changed.
    pub fn update_best(&mut self) -> bool {
        if self.position.is_better_than(&self.best) {
            self.best = self.position.clone();
            true
        } else {
            false
        }
    }
}
