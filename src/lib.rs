//! `swarmfit` provides a particle swarm optimizer (PSO) for minimizing black-box functions inside
//! a box. No gradients are needed. The user implements the [`CostFunction`](traits::CostFunction)
//! trait on some struct which takes a slice of parameters and returns a single-valued
//! [`Result`] ($`f(\mathbb{R}^n) \to \mathbb{R}`$). Constraints beyond the box can be encoded
//! as penalties: an infeasible point simply returns a very large score, which loses every
//! comparison.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Update Methods](#update-methods)
//! - [Logging](#logging)
//!
//! # Key Features
//! * A faithful, deterministic (given a seeded [`fastrand::Rng`]) global-best PSO.
//! * Explicit position and velocity boxes with component-wise clamping.
//! * Configuration errors are reported before the first function evaluation.
//! * The per-iteration history of the global best is returned with the result, ready to be
//!   plotted as a convergence curve.
//! * [`Observer`](traits::Observer)s and [`AbortSignal`](traits::AbortSignal)s (including
//!   `Ctrl-C`) through the [`Engine`](core::Engine).
//!
//! # Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//! use fastrand::Rng;
//! use swarmfit::prelude::*;
//!
//! pub struct Sphere;
//! impl CostFunction for Sphere {
//!     fn evaluate(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
//!         Ok(x.iter().map(|xi| xi.powi(2)).sum())
//!     }
//! }
//!
//! fn main() -> Result<(), SwarmError> {
//!     let mut pso = PSO::new(2, Rng::with_seed(0));
//!     pso.configure(|c| {
//!         c.with_n_particles(20)
//!             .with_iterations(100)
//!             .with_position_bounds([(-5.0, 5.0), (-5.0, 5.0)])
//!             .with_velocity_bounds([(-1.0, 1.0), (-1.0, 1.0)])
//!     });
//!     let summary = pso.run(&Sphere, &mut ())?;
//!     assert_eq!(summary.history.len(), 101);
//!     assert!(summary.best_score < 1e-2);
//!     Ok(())
//! }
//! ```
//!
//! # Update Methods
//!
//! By default ([`SwarmUpdateMethod::Asynchronous`](algorithms::particles::SwarmUpdateMethod)),
//! particles are moved one after another and the global best is updated as soon as a particle
//! improves on it, so later particles in the same iteration are already pulled toward the new
//! best. [`SwarmUpdateMethod::Synchronous`](algorithms::particles::SwarmUpdateMethod) instead
//! holds the global best fixed for the whole iteration and updates it once all particles have
//! moved.
//!
//! # Logging
//!
//! The crate logs through [`tracing`]. Nothing is printed unless the application installs a
//! subscriber (the `swarmfit` binary installs `tracing_subscriber::fmt` with `RUST_LOG`
//! filtering).
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the optimization algorithms.
pub mod algorithms;
/// Module containing the core types: bounds, points, summaries, and the [`Engine`](core::Engine).
pub mod core;
/// Module containing the error types.
pub mod error;
/// Module containing general-purpose [`Observer`](traits::Observer)s.
pub mod observers;
/// Module containing standard functions for testing algorithms.
pub mod test_functions;
/// Module containing the traits which connect user code to the optimizer.
pub mod traits;

pub use nalgebra::DVector;

/// The floating-point type used throughout the crate (`f64`, or `f32` with the `f32` feature).
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate (`f64`, or `f32` with the `f32` feature).
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$ at [`Float`] precision.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;
/// The mathematical constant $`\pi`$ at [`Float`] precision.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Prelude module containing everything someone should need to use this crate for
/// non-development purposes.
pub mod prelude {
    pub use crate::{
        algorithms::particles::{PSOConfig, SwarmStatus, SwarmUpdateMethod, PSO},
        core::{Bound, Bounds, Engine, SwarmSummary},
        error::{ConfigError, SwarmError},
        traits::{AbortSignal, CostFunction, Observer},
        Float,
    };
}
