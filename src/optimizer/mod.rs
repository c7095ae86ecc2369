//! Multi-strategy orchestration.
//!
//! [`Optimizer`] validates a matrix once, runs one strategy or every
//! applicable one, substitutes the greedy solver for any strategy that
//! cannot answer, and reports the best tour with its savings against the
//! naive index-order tour.

mod config;
mod report;
mod runner;

pub use config::OptimizerConfig;
pub use report::{ComparisonReport, SavingsSummary, SkippedStrategy, StrategyRun};
pub use runner::Optimizer;
