//! Brute-force permutation search.
//!
//! # Algorithm
//!
//! Depth-first enumeration of every ordering of the stops `1..N`, in
//! lexicographic order. Each branch carries the cost of its prefix, so a
//! leaf costs one addition (the return leg) on top of its parent. The
//! first ordering with the strictly lowest cost wins, which makes the
//! result deterministic.
//!
//! Prefix costs are accumulated left to right exactly as
//! [`ValidatedMatrix::path_cost`] does, so the reported cost is the
//! bit-identical cost of the returned tour.
//!
//! # Complexity
//!
//! O((N-1)!) leaves, O(N) memory.

use super::config::ExactConfig;
use crate::error::SolveError;
use crate::matrix::ValidatedMatrix;
use crate::strategy::{StrategyKind, StrategyResult, TourStrategy};
use crate::tour::{Tour, DEPOT};
use std::time::Instant;
use tracing::debug;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExactResult {
    /// Optimal stop order, depot excluded.
    pub best: Vec<usize>,
    /// Cost of the optimal closed tour.
    pub best_cost: f64,
    /// Number of complete tours evaluated: `(N-1)!`.
    pub permutations_evaluated: u64,
}

/// Runs the exhaustive search.
pub struct ExactRunner;

impl ExactRunner {
    /// Enumerates every tour of `matrix`.
    ///
    /// No size guard is applied here; callers go through [`ExactSolver`].
    pub fn run(matrix: &ValidatedMatrix) -> ExactResult {
        let stops = matrix.stop_count();
        let mut search = Search {
            matrix,
            path: Vec::with_capacity(stops),
            used: vec![false; stops + 1],
            best: Vec::new(),
            best_cost: f64::INFINITY,
            evaluated: 0,
        };
        search.descend(DEPOT, 0.0);

        ExactResult {
            best: search.best,
            best_cost: search.best_cost,
            permutations_evaluated: search.evaluated,
        }
    }
}

struct Search<'a> {
    matrix: &'a ValidatedMatrix,
    path: Vec<usize>,
    used: Vec<bool>,
    best: Vec<usize>,
    best_cost: f64,
    evaluated: u64,
}

impl Search<'_> {
    fn descend(&mut self, last: usize, prefix: f64) {
        if self.path.len() == self.matrix.stop_count() {
            let cost = prefix + self.matrix.get(last, DEPOT);
            self.evaluated += 1;
            if cost < self.best_cost {
                self.best_cost = cost;
                self.best.clone_from(&self.path);
            }
            return;
        }

        for next in 1..self.matrix.size() {
            if self.used[next] {
                continue;
            }
            self.used[next] = true;
            self.path.push(next);
            self.descend(next, prefix + self.matrix.get(last, next));
            self.path.pop();
            self.used[next] = false;
        }
    }
}

/// Optimal solver for small instances.
///
/// Refuses instances above [`ExactConfig::max_points`] with
/// [`SolveError::ThresholdExceeded`] instead of running for hours.
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: ExactConfig,
}

impl ExactSolver {
    pub fn new(config: ExactConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExactConfig {
        &self.config
    }
}

impl TourStrategy for ExactSolver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exact
    }

    fn check(&self, matrix: &ValidatedMatrix) -> Result<(), SolveError> {
        if matrix.size() > self.config.max_points {
            return Err(SolveError::ThresholdExceeded {
                points: matrix.size(),
                max: self.config.max_points,
            });
        }
        Ok(())
    }

    fn solve(&self, matrix: &ValidatedMatrix) -> Result<StrategyResult, SolveError> {
        self.check(matrix)?;

        let start = Instant::now();
        let result = ExactRunner::run(matrix);
        let tour = Tour::from_stops(&result.best).map_err(|e| SolveError::NoSolution {
            strategy: StrategyKind::Exact,
            reason: e.to_string(),
        })?;
        let elapsed = start.elapsed();

        debug!(
            points = matrix.size(),
            permutations = result.permutations_evaluated,
            cost = result.best_cost,
            ?elapsed,
            "exact search complete"
        );
        Ok(StrategyResult::new(tour, result.best_cost, elapsed))
    }
}
