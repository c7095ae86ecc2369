//! Error taxonomy.
//!
//! Only [`ValidationError`] ever escapes an optimization request.
//! [`SolveError`] values are degradation signals: the orchestrator absorbs
//! them by substituting the greedy solver and recording the substitution.

use crate::strategy::StrategyKind;
use thiserror::Error;

/// The distance matrix violates a shape or value invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The matrix has no rows. At least the depot is required.
    #[error("distance matrix is empty; at least the depot is required")]
    Empty,

    /// A row length differs from the number of rows.
    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    Shape {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// An entry is negative, NaN or infinite.
    #[error("entry ({row}, {col}) = {value} is not a finite non-negative cost")]
    Value { row: usize, col: usize, value: f64 },

    /// A diagonal entry is non-zero.
    #[error("diagonal entry ({index}, {index}) = {value} must be zero")]
    Diagonal { index: usize, value: f64 },
}

impl ValidationError {
    /// Returns `true` for failures of the square `N >= 1` shape requirement.
    pub fn is_shape(&self) -> bool {
        matches!(self, ValidationError::Empty | ValidationError::Shape { .. })
    }
}

/// A strategy could not produce a result as requested.
///
/// Every variant is recoverable.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SolveError {
    /// The instance is larger than the exact solver's configured limit.
    #[error("{points} points exceed the exact solver limit of {max}")]
    ThresholdExceeded { points: usize, max: usize },

    /// The strategy ran but produced no feasible tour.
    #[error("{strategy} produced no solution: {reason}")]
    NoSolution {
        strategy: StrategyKind,
        reason: String,
    },

    /// No metaheuristic backend is available in this build or configuration.
    #[error("metaheuristic backend is not available")]
    BackendUnavailable,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("exact solver limit must be at least 1, got {0}")]
    ExactLimit(usize),

    #[error("cost scale must be a finite value >= 1, got {0}")]
    CostScale(f64),

    #[error("annealing: {0}")]
    Annealing(String),
}

/// A sequence of point indices that is not a valid closed tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("tour for {points} points must have {expected} entries, got {len}")]
    Length {
        points: usize,
        expected: usize,
        len: usize,
    },

    #[error("tour must start and end at the depot (index 0)")]
    Depot,

    #[error("stop {0} is out of range or repeated")]
    Stop(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_classification() {
        assert!(ValidationError::Empty.is_shape());
        assert!(ValidationError::Shape {
            row: 1,
            len: 2,
            expected: 3
        }
        .is_shape());
        assert!(!ValidationError::Diagonal {
            index: 0,
            value: 1.0
        }
        .is_shape());
    }

    #[test]
    fn test_messages() {
        let err = SolveError::ThresholdExceeded { points: 12, max: 10 };
        assert_eq!(err.to_string(), "12 points exceed the exact solver limit of 10");

        let err = SolveError::NoSolution {
            strategy: StrategyKind::Metaheuristic,
            reason: "time budget exhausted".into(),
        };
        assert_eq!(
            err.to_string(),
            "metaheuristic produced no solution: time budget exhausted"
        );
    }
}
