use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    algorithms::particles::{PSOConfig, SwarmStatus, PSO},
    error::SwarmError,
    traits::{AbortSignal, CostFunction, Observer},
};

use super::{NopAbortSignal, SwarmSummary};

/// The main struct used for running a [`PSO`] on a [`CostFunction`] with [`Observer`]s and an
/// [`AbortSignal`].
pub struct Engine<U> {
    /// The [`SwarmStatus`] of the run, usually read after minimization.
    pub status: SwarmStatus,
    /// The [`SwarmSummary`] of the last run, usually read after minimization.
    pub result: SwarmSummary,

    pso: PSO,
    observers: Vec<Arc<RwLock<dyn Observer<U>>>>,
    abort_signal: Box<dyn AbortSignal>,
    user_data: U,
    parameter_names: Option<Vec<String>>,
}

impl<U: Default> Engine<U> {
    /// Creates a new [`Engine`] around the given [`PSO`].
    pub fn new(pso: PSO) -> Self {
        Self {
            status: SwarmStatus::default(),
            result: SwarmSummary::default(),
            pso,
            observers: Vec::default(),
            abort_signal: Box::new(NopAbortSignal),
            user_data: U::default(),
            parameter_names: None,
        }
    }
}

impl<U> Engine<U> {
    /// Convenience method to use chainable methods to set up the [`Engine`].
    ///
    /// ```rust
    /// use fastrand::Rng;
    /// use swarmfit::{core::CtrlCAbortSignal, prelude::*};
    ///
    /// let engine: Engine<()> = Engine::new(PSO::new(2, Rng::with_seed(0))).setup(|e| {
    ///     e.configure(|c| {
    ///         c.with_position_bounds([(-4.0, 4.0), (-4.0, 4.0)])
    ///             .with_velocity_bounds([(-1.0, 1.0), (-1.0, 1.0)])
    ///     })
    ///     .with_abort_signal(CtrlCAbortSignal::new())
    /// });
    /// ```
    pub fn setup<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        f(&mut self);
        self
    }

    /// Edit the [`PSOConfig`] of the wrapped [`PSO`].
    pub fn configure<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut PSOConfig) -> &mut PSOConfig,
    {
        self.pso.configure(f);
        self
    }

    /// Sets the names of the parameters. This is only used for printing and debugging purposes.
    pub fn with_parameter_names<I: IntoIterator<Item = String>>(&mut self, names: I) -> &mut Self {
        self.parameter_names = Some(names.into_iter().collect());
        self
    }

    /// Set the [`AbortSignal`] of the [`Engine`].
    pub fn with_abort_signal<A: AbortSignal + 'static>(&mut self, abort_signal: A) -> &mut Self {
        self.abort_signal = Box::new(abort_signal);
        self
    }

    /// Set user data for the [`Engine`].
    pub fn with_user_data<T: Into<U>>(&mut self, data: T) -> &mut Self {
        self.user_data = data.into();
        self
    }

    /// Adds a single [`Observer`] to the [`Engine`].
    pub fn with_observer(&mut self, observer: Arc<RwLock<dyn Observer<U>>>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// The user data, as left by the last run.
    pub const fn user_data(&self) -> &U {
        &self.user_data
    }

    /// The wrapped [`PSO`].
    pub const fn pso(&self) -> &PSO {
        &self.pso
    }

    /// Minimize the given [`CostFunction`].
    ///
    /// The abort signal is reset, then [`PSO::process`] runs the swarm with every registered
    /// [`Observer`]. Finally [`PSO::summarize`] stores a [`SwarmSummary`] in
    /// [`Engine::result`]. If the run is aborted, the summary still holds the best point found
    /// so far.
    ///
    /// # Errors
    ///
    /// Returns a [`SwarmError`] if the configuration is invalid or the cost function fails.
    pub fn minimize<E>(&mut self, func: &dyn CostFunction<U, E>) -> Result<(), SwarmError<E>> {
        self.abort_signal.reset();
        tracing::info!(
            dimension = self.pso.dimension(),
            n_particles = self.pso.config().n_particles(),
            iterations = self.pso.config().iterations(),
            "starting particle swarm run"
        );
        self.pso.process(
            func,
            &mut self.user_data,
            &mut self.status,
            &self.observers,
            self.abort_signal.as_ref(),
        )?;
        if self.abort_signal.is_aborted() {
            tracing::warn!(
                iterations = self.status.iterations(),
                "run aborted, returning the best point found so far"
            );
        }
        self.result = self
            .pso
            .summarize(&self.status, self.parameter_names.as_ref());
        tracing::info!(
            best_score = self.result.best_score,
            iterations = self.result.iterations,
            cost_evals = self.result.cost_evals,
            "{}",
            self.result.message
        );
        Ok(())
    }
}
