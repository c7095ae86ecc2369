//! Bounded metaheuristic strategy.
//!
//! The strategy is an adapter around a pluggable [`RoutingBackend`]: the
//! matrix becomes an integer transition-cost callback, the backend searches
//! under a hard time budget, and its route becomes a [`Tour`](crate::tour::Tour).
//!
//! Whether a backend exists is decided once, at construction time, by
//! [`default_backend`]. With the `annealing` feature (on by default) the
//! built-in [`AnnealingBackend`] is used; without it the strategy reports
//! itself unavailable and the orchestrator degrades to greedy.
//!
//! Time-bounded and randomised: repeated calls on the same matrix may
//! return different tours and costs. Empirically the cost is no worse
//! than greedy's, but that is not a guarantee.

#[cfg(feature = "annealing")]
mod annealing;
mod backend;
mod config;
mod runner;

#[cfg(feature = "annealing")]
pub use annealing::AnnealingBackend;
pub use backend::{default_backend, CostCallback, RoutingBackend, RoutingRequest, RoutingSolution};
pub use config::MetaheuristicConfig;
pub use runner::MetaheuristicSolver;
