use std::sync::Arc;

use fastrand::Rng;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{Swarm, SwarmStatus, SwarmUpdateMethod},
    core::{utils::SampleFloat, Bound, Bounds, NopAbortSignal, SwarmSummary},
    error::{BoundsKind, ConfigError, SwarmError},
    traits::{AbortSignal, CostFunction, Observer},
    Float,
};

/// The configuration struct for the [`PSO`] algorithm.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PSOConfig {
    n_particles: usize,
    iterations: usize,
    position_bounds: Bounds,
    velocity_bounds: Bounds,
    omega: Float,
    c1: Float,
    c2: Float,
    update_method: SwarmUpdateMethod,
}
impl PSOConfig {
    /// Sets the number of particles in the swarm (default = `50`).
    pub fn with_n_particles(&mut self, value: usize) -> &mut Self {
        self.n_particles = value;
        self
    }
    /// Sets the number of update iterations performed after initialization (default = `500`).
    pub fn with_iterations(&mut self, value: usize) -> &mut Self {
        self.iterations = value;
        self
    }
    /// Sets the box which particle positions are drawn from and confined to, one [`Bound`] per
    /// dimension.
    pub fn with_position_bounds<I: IntoIterator<Item = B>, B: Into<Bound>>(
        &mut self,
        bounds: I,
    ) -> &mut Self {
        self.position_bounds = bounds.into_iter().collect();
        self
    }
    /// Sets the position box from separate lists of lower and upper limits.
    pub fn with_position_limits(&mut self, lower: &[Float], upper: &[Float]) -> &mut Self {
        self.position_bounds = Bounds::from_limits(lower, upper);
        self
    }
    /// Sets the box which particle velocities are drawn from and confined to, one [`Bound`] per
    /// dimension.
    pub fn with_velocity_bounds<I: IntoIterator<Item = B>, B: Into<Bound>>(
        &mut self,
        bounds: I,
    ) -> &mut Self {
        self.velocity_bounds = bounds.into_iter().collect();
        self
    }
    /// Sets the velocity box from separate lists of lower and upper limits.
    pub fn with_velocity_limits(&mut self, lower: &[Float], upper: &[Float]) -> &mut Self {
        self.velocity_bounds = Bounds::from_limits(lower, upper);
        self
    }
    /// Sets the inertial weight $`\omega`$ (default = `0.6`).
    pub fn with_omega(&mut self, value: Float) -> &mut Self {
        self.omega = value;
        self
    }
    /// Sets the cognitive weight $`c_1`$ which controls the particle's tendency
    /// to move towards its personal best (default = `1.7`).
    pub fn with_c1(&mut self, value: Float) -> &mut Self {
        self.c1 = value;
        self
    }
    /// Sets the social weight $`c_2`$ which controls the particle's tendency
    /// to move towards the global best (default = `1.7`).
    pub fn with_c2(&mut self, value: Float) -> &mut Self {
        self.c2 = value;
        self
    }
    /// Sets the [`SwarmUpdateMethod`] (default = [`SwarmUpdateMethod::Asynchronous`]).
    pub fn with_update_method(&mut self, value: SwarmUpdateMethod) -> &mut Self {
        self.update_method = value;
        self
    }
    /// The number of particles in the swarm.
    pub const fn n_particles(&self) -> usize {
        self.n_particles
    }
    /// The number of update iterations.
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
    /// The position box.
    pub const fn position_bounds(&self) -> &Bounds {
        &self.position_bounds
    }
    /// The velocity box.
    pub const fn velocity_bounds(&self) -> &Bounds {
        &self.velocity_bounds
    }
    /// The inertial weight $`\omega`$.
    pub const fn omega(&self) -> Float {
        self.omega
    }
    /// The cognitive weight $`c_1`$.
    pub const fn c1(&self) -> Float {
        self.c1
    }
    /// The social weight $`c_2`$.
    pub const fn c2(&self) -> Float {
        self.c2
    }
    /// The [`SwarmUpdateMethod`].
    pub const fn update_method(&self) -> SwarmUpdateMethod {
        self.update_method
    }
    /// Check the configuration against a problem with `dimension` free parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the swarm is empty, the dimension is zero, either box does
    /// not have exactly `dimension` finite, non-inverted bounds, or a weight is NaN or infinite.
    /// Negative weights are accepted.
    pub fn validate(&self, dimension: usize) -> Result<(), ConfigError> {
        if self.n_particles == 0 {
            return Err(ConfigError::EmptySwarm);
        }
        if dimension == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        self.position_bounds
            .validate(BoundsKind::Position, dimension)?;
        self.velocity_bounds
            .validate(BoundsKind::Velocity, dimension)?;
        for (name, value) in [("omega", self.omega), ("c1", self.c1), ("c2", self.c2)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}
impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            n_particles: 50,
            iterations: 500,
            position_bounds: Bounds::default(),
            velocity_bounds: Bounds::default(),
            omega: 0.6,
            c1: 1.7,
            c2: 1.7,
            update_method: SwarmUpdateMethod::default(),
        }
    }
}

/// Particle Swarm Optimizer
///
/// The PSO algorithm moves an ensemble of particles through a bounded parameter space. Every
/// iteration, each particle's velocity is updated as follows:
///
/// ```math
/// v_i^{t+1} = \omega v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are scalars drawn uniformly from $`[0,1)`$ for each particle,
/// $`\omega`$ is an inertial weight parameter, $`c_1`$ and $`c_2`$ are cognitive and social
/// weights respectively, $`p_i^t`$ is the particle's personal best position, and $`g^t`$ is the
/// swarm's best position. The velocity is clamped into the velocity box, the particle is moved
/// by it, and the new position is clamped into the position box before it is evaluated. See
/// [^1] for the algorithm and [^2] for the choice of default weights.
///
/// [^1]: [Kennedy, J., & Eberhart, R. (1995). Particle swarm optimization. Proceedings of ICNN'95 - International Conference on Neural Networks (Vol. 4, pp. 1942–1948). IEEE.](https://doi.org/10.1109/ICNN.1995.488968)
/// [^2]: [Trelea, I. C. (2003). The particle swarm optimization algorithm: convergence analysis and parameter selection. Information Processing Letters, 85(6), 317–325.](https://doi.org/10.1016/S0020-0190(02)00447-7)
#[derive(Clone)]
pub struct PSO {
    config: PSOConfig,
    rng: Rng,
    dimension: usize,
}

impl PSO {
    /// Construct a new particle swarm optimizer working in a `dimension` dimensional space,
    /// drawing all of its random numbers from `rng`.
    pub fn new(dimension: usize, rng: Rng) -> Self {
        Self {
            config: PSOConfig::default(),
            rng,
            dimension,
        }
    }
    /// Edit the [`PSOConfig`] in place.
    pub fn configure<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut PSOConfig) -> &mut PSOConfig,
    {
        f(&mut self.config);
        self
    }
    /// Replace the [`PSOConfig`].
    pub fn with_config(mut self, config: PSOConfig) -> Self {
        self.config = config;
        self
    }
    /// The current configuration.
    pub const fn config(&self) -> &PSOConfig {
        &self.config
    }
    /// The number of free parameters.
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Validate the configuration, then create and evaluate the swarm and record the initial
    /// global best as the first entry of the history.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidConfiguration`] before any evaluation if the configuration
    /// is rejected by [`PSOConfig::validate`], or [`SwarmError::ObjectiveEvaluationFailure`] if
    /// the cost function fails.
    pub fn initialize<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        self.config.validate(self.dimension)?;
        status.reset();
        status.swarm = Swarm {
            particles: Vec::with_capacity(self.config.n_particles),
            update_method: self.config.update_method,
        };
        status
            .swarm
            .initialize(
                &mut self.rng,
                self.config.n_particles,
                &self.config.position_bounds,
                &self.config.velocity_bounds,
                func,
                user_data,
            )
            .map_err(SwarmError::ObjectiveEvaluationFailure)?;
        status.n_f_evals += self.config.n_particles;
        if let Some(best) = status.swarm.index_of_best() {
            status.gbest = status.swarm.particles[best].best.clone();
        }
        status.history.push(status.gbest.fx_or_inf());
        status.update_message("Initialized");
        tracing::debug!(
            n_particles = self.config.n_particles,
            dimension = self.dimension,
            best_score = status.gbest.fx_or_inf(),
            "swarm initialized"
        );
        Ok(())
    }

    /// Move every particle once and append the resulting global best to the history.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::ObjectiveEvaluationFailure`] if the cost function fails. The swarm
    /// is left part-way through the iteration in that case.
    pub fn step<U, E>(
        &mut self,
        i_step: usize,
        func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> Result<(), SwarmError<E>> {
        let moved = match status.swarm.update_method {
            SwarmUpdateMethod::Asynchronous => self.update_async(func, status, user_data),
            SwarmUpdateMethod::Synchronous => self.update_sync(func, status, user_data),
        };
        moved.map_err(SwarmError::ObjectiveEvaluationFailure)?;
        status.history.push(status.gbest.fx_or_inf());
        tracing::trace!(
            iteration = i_step + 1,
            best_score = status.gbest.fx_or_inf(),
            "swarm step"
        );
        Ok(())
    }

    fn update_async<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> Result<(), E> {
        for particle in &mut status.swarm.particles {
            let r1 = self.rng.float();
            let r2 = self.rng.float();
            particle.update_velocity(
                self.config.omega,
                self.config.c1,
                self.config.c2,
                r1,
                r2,
                &status.gbest.x,
                &self.config.velocity_bounds,
            );
            particle.update_position(func, user_data, &self.config.position_bounds)?;
            status.n_f_evals += 1;
            if particle.update_best() && particle.best.is_better_than(&status.gbest) {
                status.gbest = particle.best.clone();
            }
        }
        Ok(())
    }

    fn update_sync<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> Result<(), E> {
        let social_best = status.gbest.x.clone();
        for particle in &mut status.swarm.particles {
            let r1 = self.rng.float();
            let r2 = self.rng.float();
            particle.update_velocity(
                self.config.omega,
                self.config.c1,
                self.config.c2,
                r1,
                r2,
                &social_best,
                &self.config.velocity_bounds,
            );
            particle.update_position(func, user_data, &self.config.position_bounds)?;
            status.n_f_evals += 1;
            particle.update_best();
        }
        if let Some(best) = status.swarm.index_of_best() {
            if status.swarm.particles[best]
                .best
                .is_better_than(&status.gbest)
            {
                status.gbest = status.swarm.particles[best].best.clone();
            }
        }
        Ok(())
    }

    /// Run the full optimization: [`PSO::initialize`], then one [`PSO::step`] per configured
    /// iteration. Before each iteration the `abort_signal` is checked, and after initialization
    /// and after each iteration every observer is called with the current step (`0` for the
    /// initial swarm). The run stops early if the signal is set or an observer breaks.
    ///
    /// # Errors
    ///
    /// See [`PSO::initialize`] and [`PSO::step`].
    pub fn process<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        status: &mut SwarmStatus,
        observers: &[Arc<RwLock<dyn Observer<U>>>],
        abort_signal: &dyn AbortSignal,
    ) -> Result<(), SwarmError<E>> {
        self.initialize(func, status, user_data)?;
        if Self::notify(observers, 0, status, user_data) {
            status.update_message("Stopped by observer after initialization");
            return Ok(());
        }
        let iterations = self.config.iterations;
        for i_step in 0..iterations {
            if abort_signal.is_aborted() {
                status.update_message("Abort signal received");
                return Ok(());
            }
            self.step(i_step, func, status, user_data)?;
            if Self::notify(observers, i_step + 1, status, user_data) {
                status.update_message(&format!(
                    "Stopped by observer after iteration {}",
                    i_step + 1
                ));
                return Ok(());
            }
        }
        status.update_message(&format!(
            "Maximum number of iterations reached ({iterations})"
        ));
        Ok(())
    }

    fn notify<U>(
        observers: &[Arc<RwLock<dyn Observer<U>>>],
        step: usize,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> bool {
        let mut stop = false;
        for observer in observers {
            stop = observer
                .write()
                .callback(step, status, user_data)
                .is_break()
                || stop;
        }
        stop
    }

    /// Run the optimization without observers or an abort signal and return its summary.
    ///
    /// The swarm state is discarded; only value copies of the best point and the history are
    /// returned.
    ///
    /// # Errors
    ///
    /// See [`PSO::initialize`] and [`PSO::step`].
    pub fn run<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<SwarmSummary, SwarmError<E>> {
        let mut status = SwarmStatus::default();
        self.process(func, user_data, &mut status, &[], &NopAbortSignal)?;
        Ok(self.summarize(&status, None))
    }

    /// Build a [`SwarmSummary`] from the current status.
    pub fn summarize(
        &self,
        status: &SwarmStatus,
        parameter_names: Option<&Vec<String>>,
    ) -> SwarmSummary {
        SwarmSummary {
            best_position: status.gbest.x.iter().copied().collect(),
            best_score: status.gbest.fx_or_inf(),
            history: status.history.clone(),
            iterations: status.iterations(),
            cost_evals: status.n_f_evals,
            message: status.message.clone(),
            parameter_names: parameter_names.cloned(),
            position_bounds: self.config.position_bounds.clone(),
        }
    }
}
