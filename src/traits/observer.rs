use std::ops::ControlFlow;

use crate::algorithms::particles::SwarmStatus;

/// A trait which holds a [`callback`](`Observer::callback`) function that can be used to check
/// the [`SwarmStatus`] during a run.
///
/// Observers are registered on an [`Engine`](crate::core::Engine) wrapped in
/// `Arc<parking_lot::RwLock<_>>`, so the caller keeps a handle to read them after the run.
pub trait Observer<U> {
    /// A function that is called after every iteration of the swarm. If it returns
    /// [`ControlFlow::Break`], the [`Engine::minimize`](crate::core::Engine::minimize) method
    /// will stop after the current iteration.
    fn callback(&mut self, step: usize, status: &mut SwarmStatus, user_data: &mut U)
        -> ControlFlow<()>;
}
