/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal)
pub mod abort_signal;
/// [`Bound`] type for binding variables to a range.
pub mod bound;
/// [`Engine`] type for running a swarm with observers and abort signals.
pub mod engine;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`SwarmSummary`] type for the result of a run.
pub mod summary;
/// Random-number helpers.
pub mod utils;

pub use abort_signal::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use bound::{Bound, Bounds};
pub use engine::Engine;
pub use point::Point;
pub use summary::SwarmSummary;
