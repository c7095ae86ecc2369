//! Adapter between a [`ValidatedMatrix`] and a [`RoutingBackend`].
//!
//! Scales costs into the backend's integer domain, runs the backend on a
//! worker thread, and turns its route back into a tour.
//!
//! The budget is enforced here, not by the backend: the adapter waits at
//! most `time_limit` (plus a short hand-off grace) for an answer. On
//! expiry it raises the request's cancel flag, abandons the worker and
//! reports [`SolveError::NoSolution`]; a late route is never used.
//!
//! The reported `total_cost` is the returned tour re-costed on the matrix
//! at native precision. The backend's own objective, unscaled, is only
//! logged: it carries the rounding of every scaled arc and would not
//! compare fairly with the other strategies' costs.
//!
//! Results are not reproducible unless a seed is configured, and even
//! then only when the time limit does not cut the search short.

use super::backend::{CostCallback, RoutingBackend, RoutingRequest};
use super::config::MetaheuristicConfig;
use crate::error::SolveError;
use crate::matrix::ValidatedMatrix;
use crate::strategy::{StrategyKind, StrategyResult, TourStrategy};
use crate::tour::{Tour, DEPOT};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Allowance for handing a result back across threads after the budget.
const RESULT_GRACE: Duration = Duration::from_millis(50);

/// The bounded metaheuristic strategy.
///
/// Constructed with `None` when no backend is available; every call then
/// reports [`SolveError::BackendUnavailable`].
#[derive(Debug, Clone)]
pub struct MetaheuristicSolver {
    config: MetaheuristicConfig,
    backend: Option<Arc<dyn RoutingBackend>>,
}

impl MetaheuristicSolver {
    pub fn new(config: MetaheuristicConfig, backend: Option<Arc<dyn RoutingBackend>>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &MetaheuristicConfig {
        &self.config
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn no_solution(reason: impl Into<String>) -> SolveError {
        SolveError::NoSolution {
            strategy: StrategyKind::Metaheuristic,
            reason: reason.into(),
        }
    }

    /// Scaled integer costs over a shared copy of the matrix, so the
    /// callback can outlive this call on an abandoned worker.
    fn cost_callback(&self, matrix: &ValidatedMatrix) -> Arc<CostCallback<'static>> {
        let matrix = Arc::new(matrix.clone());
        let config = self.config.clone();
        Arc::new(move |from: usize, to: usize| config.scale(matrix.get(from, to)))
    }

    /// Checks that the largest possible route cost fits in `i64`.
    fn check_scale(&self, matrix: &ValidatedMatrix) -> Result<(), SolveError> {
        let worst = matrix.max_entry() * self.config.cost_scale * matrix.size() as f64;
        if worst >= i64::MAX as f64 / 2.0 {
            return Err(Self::no_solution(format!(
                "cost scale {} overflows the integer cost domain",
                self.config.cost_scale
            )));
        }
        Ok(())
    }
}

impl TourStrategy for MetaheuristicSolver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Metaheuristic
    }

    fn check(&self, _matrix: &ValidatedMatrix) -> Result<(), SolveError> {
        if self.backend.is_none() {
            return Err(SolveError::BackendUnavailable);
        }
        Ok(())
    }

    fn solve(&self, matrix: &ValidatedMatrix) -> Result<StrategyResult, SolveError> {
        let backend = self.backend.as_ref().ok_or(SolveError::BackendUnavailable)?;
        self.config
            .validate()
            .map_err(|e| Self::no_solution(e.to_string()))?;
        self.check_scale(matrix)?;

        let start = Instant::now();
        let budget = self.config.time_limit;
        let cancel = Arc::new(AtomicBool::new(false));
        let request = RoutingRequest {
            nodes: matrix.size(),
            vehicles: 1,
            depot: DEPOT,
            cost: self.cost_callback(matrix),
            time_limit: budget,
            max_iterations: self.config.max_iterations,
            seed: self.config.seed,
            cancel: Arc::clone(&cancel),
        };

        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(backend);
        thread::Builder::new()
            .name(format!("u-tour-{}", backend.name()))
            .spawn(move || {
                // The receiver is gone once the budget has expired.
                let _ = tx.send(worker.solve(&request));
            })
            .map_err(|e| Self::no_solution(format!("cannot start {}: {e}", backend.name())))?;

        let solution = match rx.recv_timeout(budget.saturating_add(RESULT_GRACE)) {
            Ok(solution) => solution,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                cancel.store(true, Ordering::Relaxed);
                warn!(
                    backend = backend.name(),
                    ?budget,
                    "backend overran its budget; abandoning it"
                );
                return Err(Self::no_solution(format!(
                    "{} exceeded the time budget of {budget:?}",
                    backend.name()
                )));
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(Self::no_solution(format!("{} stopped without an answer", backend.name())));
            }
        };
        cancel.store(true, Ordering::Relaxed);

        let solution = solution.ok_or_else(|| {
            Self::no_solution(format!(
                "{} found no feasible route within {budget:?}",
                backend.name()
            ))
        })?;
        let tour = Tour::new(solution.route)
            .map_err(|e| Self::no_solution(format!("{} returned an invalid route: {e}", backend.name())))?;
        let total_cost = tour.cost(matrix);
        let elapsed = start.elapsed();

        debug!(
            backend = backend.name(),
            points = matrix.size(),
            cost = total_cost,
            scaled_cost = self.config.unscale(solution.objective),
            ?elapsed,
            "metaheuristic search complete"
        );
        Ok(StrategyResult::new(tour, total_cost, elapsed))
    }
}
