use std::{convert::Infallible, fmt::Display};

use thiserror::Error;

use crate::Float;

/// Which box a configuration problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsKind {
    /// The box particle positions are confined to.
    Position,
    /// The box particle velocities are confined to.
    Velocity,
}

impl Display for BoundsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => write!(f, "position"),
            Self::Velocity => write!(f, "velocity"),
        }
    }
}

/// Problems with a [`PSOConfig`](crate::algorithms::particles::PSOConfig) which are detected
/// before any function evaluation takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The swarm must contain at least one particle.
    #[error("the swarm must contain at least one particle")]
    EmptySwarm,

    /// The problem must have at least one free parameter.
    #[error("the problem dimension must be at least 1")]
    ZeroDimension,

    /// A bounds list does not have one entry per dimension.
    #[error("{kind} bounds have {got} entries, expected {expected}")]
    DimensionMismatch {
        /// The bounds which have the wrong length
        kind: BoundsKind,
        /// The problem dimension
        expected: usize,
        /// The number of bounds given
        got: usize,
    },

    /// A lower bound exceeds its corresponding upper bound.
    #[error("invalid {kind} bound at index {index}: lower ({lower}) > upper ({upper})")]
    InvertedBound {
        /// The bounds containing the inverted pair
        kind: BoundsKind,
        /// Index of the inverted pair
        index: usize,
        /// The lower bound value
        lower: Float,
        /// The upper bound value
        upper: Float,
    },

    /// A bound is infinite or NaN, so values cannot be drawn uniformly inside it.
    #[error("{kind} bound at index {index} is not finite")]
    NonFiniteBound {
        /// The bounds containing the offending pair
        kind: BoundsKind,
        /// Index of the offending pair
        index: usize,
    },

    /// One of the weights in the velocity update is NaN or infinite.
    #[error("invalid {name} weight: {value} (must be finite)")]
    InvalidWeight {
        /// The name of the weight (`omega`, `c1`, or `c2`)
        name: &'static str,
        /// The rejected value
        value: Float,
    },
}

impl ConfigError {
    /// Returns `true` if this error concerns the values of a position or velocity bound.
    pub const fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            Self::InvertedBound { .. } | Self::NonFiniteBound { .. }
        )
    }

    /// Returns `true` if this error concerns the dimension of the problem or of its bounds.
    pub const fn is_dimension_error(&self) -> bool {
        matches!(self, Self::ZeroDimension | Self::DimensionMismatch { .. })
    }
}

/// Errors returned by a swarm run.
///
/// The generic `E` is the error type of the user's
/// [`CostFunction`](crate::traits::CostFunction), which is passed through untouched.
#[derive(Debug, Error)]
pub enum SwarmError<E = Infallible> {
    /// The configuration was rejected before the run started.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The cost function returned an error. The run stops at the first failure.
    #[error("objective evaluation failed: {0}")]
    ObjectiveEvaluationFailure(E),
}

impl<E> SwarmError<E> {
    /// Returns the [`ConfigError`] if the run was rejected before it started.
    pub const fn config_error(&self) -> Option<&ConfigError> {
        match self {
            Self::InvalidConfiguration(err) => Some(err),
            Self::ObjectiveEvaluationFailure(_) => None,
        }
    }

    /// Consumes the error and returns the cost function's own error, if that is what failed.
    pub fn into_objective_error(self) -> Option<E> {
        match self {
            Self::InvalidConfiguration(_) => None,
            Self::ObjectiveEvaluationFailure(err) => Some(err),
        }
    }
}

/// A specialized `Result` type for swarm runs.
pub type Result<T, E = Infallible> = std::result::Result<T, SwarmError<E>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvertedBound {
            kind: BoundsKind::Position,
            index: 0,
            lower: 5.0,
            upper: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid position bound at index 0: lower (5) > upper (0)"
        );
        let err = ConfigError::DimensionMismatch {
            kind: BoundsKind::Velocity,
            expected: 4,
            got: 3,
        };
        assert_eq!(err.to_string(), "velocity bounds have 3 entries, expected 4");
    }

    #[test]
    fn test_error_classification() {
        let bounds_err = ConfigError::NonFiniteBound {
            kind: BoundsKind::Velocity,
            index: 2,
        };
        let dim_err = ConfigError::ZeroDimension;
        assert!(bounds_err.is_bounds_error());
        assert!(!bounds_err.is_dimension_error());
        assert!(dim_err.is_dimension_error());
        assert!(!ConfigError::EmptySwarm.is_bounds_error());
    }

    #[test]
    fn test_swarm_error_accessors() {
        let err: SwarmError<String> = ConfigError::EmptySwarm.into();
        assert_eq!(err.config_error(), Some(&ConfigError::EmptySwarm));
        assert!(err.into_objective_error().is_none());

        let err: SwarmError<String> = SwarmError::ObjectiveEvaluationFailure("boom".to_string());
        assert!(err.config_error().is_none());
        assert_eq!(err.to_string(), "objective evaluation failed: boom");
        assert_eq!(err.into_objective_error().as_deref(), Some("boom"));
    }
}
