//! The common strategy contract.
//!
//! Every algorithm implements [`TourStrategy`]; the orchestrator iterates
//! a list of boxed strategies instead of branching on names.

mod types;

pub use types::{Selection, StrategyKind, StrategyResult, UnknownStrategy};

use crate::error::SolveError;
use crate::matrix::ValidatedMatrix;

/// A tour-construction algorithm over a validated matrix.
///
/// Implementations are read-only over the matrix and hold no per-request
/// state, so one instance may serve concurrent requests.
pub trait TourStrategy: Send + Sync {
    /// Identity of this strategy.
    fn kind(&self) -> StrategyKind;

    /// Checks the strategy's preconditions for this instance.
    ///
    /// The orchestrator calls this before [`solve`](Self::solve) and skips
    /// or substitutes the strategy on error. Defaults to always applicable.
    fn check(&self, matrix: &ValidatedMatrix) -> Result<(), SolveError> {
        let _ = matrix;
        Ok(())
    }

    /// Produces a closed tour.
    fn solve(&self, matrix: &ValidatedMatrix) -> Result<StrategyResult, SolveError>;
}
