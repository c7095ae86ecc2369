//! Multi-strategy route optimization for a single vehicle.
//!
//! Given an `N×N` distance matrix with the depot at index `0`, the crate
//! finds a closed tour that leaves the depot, visits every other point
//! exactly once and returns. Three strategies are available:
//!
//! - **Exact**: exhaustive permutation search. Optimal, factorial in `N`,
//!   guarded by a size limit.
//! - **Metaheuristic**: a time-bounded search through a pluggable
//!   [`RoutingBackend`](metaheuristic::RoutingBackend). The built-in
//!   backend is simulated annealing followed by 2-opt descent.
//! - **Greedy**: nearest-neighbour construction. Fast, deterministic and
//!   never fails, so it stands in for any strategy that cannot answer.
//!
//! The [`Optimizer`](optimizer::Optimizer) validates the matrix once, runs
//! the requested strategies, picks the cheapest tour and measures its
//! savings against the naive `0 → 1 → … → N-1 → 0` tour.
//!
//! # Examples
//!
//! ```
//! use u_tour::matrix::DistanceMatrix;
//! use u_tour::optimizer::{Optimizer, OptimizerConfig};
//! use u_tour::strategy::Selection;
//!
//! let matrix = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 5.2, 3.1, 2.8],
//!     vec![5.2, 0.0, 4.5, 6.1],
//!     vec![3.1, 4.5, 0.0, 2.3],
//!     vec![2.8, 6.1, 2.3, 0.0],
//! ]);
//! let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
//! let report = optimizer.optimize(&matrix, Selection::AllApplicable).unwrap();
//! assert!((report.best_cost() - 14.8).abs() < 1e-9);
//! assert_eq!(report.best_tour().order().first(), Some(&0));
//! ```
//!
//! # Features
//!
//! - `annealing` (default): compiles the built-in metaheuristic backend.
//! - `parallel`: runs applicable strategies concurrently with rayon when
//!   [`OptimizerConfig::parallel`](optimizer::OptimizerConfig::parallel) is set.
//! - `serde`: serialization for tours, results, reports and configs.

pub mod error;
pub mod exact;
pub mod greedy;
pub mod matrix;
pub mod metaheuristic;
pub mod optimizer;
pub mod sa;
pub mod strategy;
pub mod tour;
