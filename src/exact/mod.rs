//! Exact solver.
//!
//! Exhaustive permutation search over the stops. Optimal and
//! deterministic, but factorial in the number of stops, so it is guarded
//! by a configurable size limit.

mod config;
mod runner;

pub use config::ExactConfig;
pub use runner::{ExactResult, ExactRunner, ExactSolver};
