//! Request orchestration.
//!
//! # Request lifecycle
//!
//! 1. **Validating**: the raw matrix is checked once and shared by every
//!    strategy. A validation failure ends the request.
//! 2. **Running**: each selected strategy's preconditions are checked,
//!    then it solves. Any [`SolveError`] is absorbed by running the greedy
//!    solver in its place and recording the substitution.
//! 3. **Aggregating**: the lowest-cost run is selected and savings are
//!    measured against the naive index-order tour.
//!
//! The optimizer keeps no state between requests.

use super::config::OptimizerConfig;
use super::report::{select_best, ComparisonReport, SavingsSummary, SkippedStrategy, StrategyRun};
use crate::error::{ConfigError, SolveError, ValidationError};
use crate::exact::ExactSolver;
use crate::greedy::GreedySolver;
use crate::matrix::{validate, DistanceMatrix, ValidatedMatrix};
use crate::metaheuristic::{default_backend, MetaheuristicSolver, RoutingBackend};
use crate::strategy::{Selection, StrategyKind, TourStrategy};
use crate::tour::Tour;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The multi-strategy tour optimizer.
///
/// # Examples
///
/// ```
/// use u_tour::matrix::DistanceMatrix;
/// use u_tour::optimizer::{Optimizer, OptimizerConfig};
/// use u_tour::strategy::{Selection, StrategyKind};
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 4.0, 1.0],
///     vec![1.0, 0.0, 1.0, 4.0],
///     vec![4.0, 1.0, 0.0, 1.0],
///     vec![1.0, 4.0, 1.0, 0.0],
/// ]);
/// let optimizer = Optimizer::with_backend(OptimizerConfig::default(), None).unwrap();
/// let report = optimizer.optimize(&matrix, Selection::Single(StrategyKind::Exact)).unwrap();
/// assert_eq!(report.best, StrategyKind::Exact);
/// assert_eq!(report.best_cost(), 4.0);
/// ```
pub struct Optimizer {
    config: OptimizerConfig,
    /// Priority order: exact, metaheuristic, greedy.
    strategies: Vec<Box<dyn TourStrategy>>,
    fallback: GreedySolver,
    has_backend: bool,
}

impl Optimizer {
    /// Creates an optimizer using the backend compiled into this build.
    pub fn new(config: OptimizerConfig) -> Result<Self, ConfigError> {
        Self::with_backend(config, default_backend())
    }

    /// Creates an optimizer with an explicit metaheuristic backend, or
    /// `None` to declare that no backend is available.
    pub fn with_backend(
        config: OptimizerConfig,
        backend: Option<Arc<dyn RoutingBackend>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        match &backend {
            Some(b) => debug!(backend = b.name(), "metaheuristic backend available"),
            None => info!("no metaheuristic backend; metaheuristic requests will use greedy"),
        }

        let has_backend = backend.is_some();
        let strategies: Vec<Box<dyn TourStrategy>> = vec![
            Box::new(ExactSolver::new(config.exact.clone())),
            Box::new(MetaheuristicSolver::new(config.metaheuristic.clone(), backend)),
            Box::new(GreedySolver),
        ];
        Ok(Self {
            config,
            strategies,
            fallback: GreedySolver,
            has_backend,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Returns `true` if the metaheuristic strategy has a backend.
    pub fn has_backend(&self) -> bool {
        self.has_backend
    }

    fn strategy(&self, kind: StrategyKind) -> Option<&dyn TourStrategy> {
        self.strategies
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| s.as_ref())
    }

    /// Validates `matrix` and runs the selected strategies on it.
    ///
    /// Fails only on validation errors; every strategy failure degrades
    /// to the greedy solver.
    pub fn optimize(
        &self,
        matrix: &DistanceMatrix,
        selection: Selection,
    ) -> Result<ComparisonReport, ValidationError> {
        let validated = validate(matrix).inspect_err(|e| warn!(error = %e, "invalid distance matrix"))?;
        Ok(self.optimize_validated(&validated, selection))
    }

    /// Runs the selected strategies on an already validated matrix.
    pub fn optimize_validated(
        &self,
        matrix: &ValidatedMatrix,
        selection: Selection,
    ) -> ComparisonReport {
        let start = Instant::now();
        info!(points = matrix.size(), ?selection, "optimizing tour");

        let mut planned: Vec<&dyn TourStrategy> = Vec::new();
        let mut degraded: Vec<(StrategyKind, SolveError, Instant)> = Vec::new();
        let mut skipped = Vec::new();

        match selection {
            Selection::Single(kind) => {
                let started = Instant::now();
                match self.strategy(kind) {
                    Some(strategy) => match strategy.check(matrix) {
                        Ok(()) => planned.push(strategy),
                        Err(reason) => degraded.push((kind, reason, started)),
                    },
                    None => degraded.push((
                        kind,
                        SolveError::NoSolution {
                            strategy: kind,
                            reason: "strategy not registered".into(),
                        },
                        started,
                    )),
                }
            }
            Selection::AllApplicable => {
                for strategy in &self.strategies {
                    match strategy.check(matrix) {
                        Ok(()) => planned.push(strategy.as_ref()),
                        Err(reason) => {
                            warn!(strategy = %strategy.kind(), %reason, "strategy skipped");
                            skipped.push(SkippedStrategy {
                                strategy: strategy.kind(),
                                reason,
                            });
                        }
                    }
                }
            }
        }

        let mut runs: Vec<StrategyRun> = self.run_all(&planned, matrix);
        for (kind, reason, started) in degraded {
            runs.push(self.substitute(kind, reason, matrix, started));
        }
        let runs: BTreeMap<StrategyKind, StrategyRun> =
            runs.into_iter().map(|run| (run.requested, run)).collect();

        // Greedy always runs or substitutes, so there is at least one run.
        let best = select_best(&runs).unwrap_or(StrategyKind::Greedy);
        let best_cost = runs[&best].result.total_cost;

        let naive_tour = Tour::naive(matrix.size());
        let naive_cost = naive_tour.cost(matrix);
        let savings = SavingsSummary::compute(naive_cost, best_cost);

        let elapsed = start.elapsed();
        info!(
            best = %best,
            cost = best_cost,
            naive_cost,
            saving_pct = savings.map(|s| s.percentage_saving),
            ?elapsed,
            "tour optimized"
        );

        ComparisonReport {
            runs,
            skipped,
            best,
            naive_tour,
            savings,
            elapsed,
        }
    }

    #[cfg(feature = "parallel")]
    fn run_all(&self, planned: &[&dyn TourStrategy], matrix: &ValidatedMatrix) -> Vec<StrategyRun> {
        use rayon::prelude::*;

        if self.config.parallel {
            planned
                .par_iter()
                .map(|s| self.run_one(*s, matrix))
                .collect()
        } else {
            planned.iter().map(|s| self.run_one(*s, matrix)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(&self, planned: &[&dyn TourStrategy], matrix: &ValidatedMatrix) -> Vec<StrategyRun> {
        planned.iter().map(|s| self.run_one(*s, matrix)).collect()
    }

    fn run_one(&self, strategy: &dyn TourStrategy, matrix: &ValidatedMatrix) -> StrategyRun {
        let kind = strategy.kind();
        let started = Instant::now();
        match strategy.solve(matrix) {
            Ok(result) => {
                debug!(
                    strategy = %kind,
                    cost = result.total_cost,
                    elapsed = ?result.elapsed,
                    "strategy finished"
                );
                StrategyRun {
                    requested: kind,
                    used: kind,
                    result,
                    degradation: None,
                }
            }
            Err(reason) => self.substitute(kind, reason, matrix, started),
        }
    }

    /// Answers `requested` with the greedy tour. The run's elapsed time
    /// covers the failed attempt as well as the fallback.
    fn substitute(
        &self,
        requested: StrategyKind,
        reason: SolveError,
        matrix: &ValidatedMatrix,
        started: Instant,
    ) -> StrategyRun {
        warn!(strategy = %requested, %reason, "strategy degraded to greedy");
        let mut result = self.fallback.run(matrix);
        result.elapsed = started.elapsed();
        StrategyRun {
            requested,
            used: StrategyKind::Greedy,
            result,
            degradation: Some(reason),
        }
    }
}

impl std::fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<StrategyKind> = self.strategies.iter().map(|s| s.kind()).collect();
        f.debug_struct("Optimizer")
            .field("config", &self.config)
            .field("strategies", &kinds)
            .field("has_backend", &self.has_backend)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::ExactConfig;
    use crate::metaheuristic::{MetaheuristicConfig, RoutingRequest, RoutingSolution};
    use std::time::Duration;

    fn four_points() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 5.2, 3.1, 2.8],
            vec![5.2, 0.0, 4.5, 6.1],
            vec![3.1, 4.5, 0.0, 2.3],
            vec![2.8, 6.1, 2.3, 0.0],
        ])
    }

    /// Ring of `n` points where neighbours cost 1 and everything else 10.
    fn ring(n: usize) -> DistanceMatrix {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let gap = (i as isize - j as isize).unsigned_abs();
                        match gap.min(n - gap) {
                            0 => 0.0,
                            1 => 1.0,
                            _ => 10.0,
                        }
                    })
                    .collect()
            })
            .collect();
        DistanceMatrix::from_rows(rows)
    }

    #[derive(Debug)]
    struct NeverSolves;

    impl RoutingBackend for NeverSolves {
        fn name(&self) -> &str {
            "never"
        }

        fn solve(&self, _request: &RoutingRequest) -> Option<RoutingSolution> {
            None
        }
    }

    /// Uses up part of its budget, then gives up.
    #[derive(Debug)]
    struct GivesUpLate(Duration);

    impl RoutingBackend for GivesUpLate {
        fn name(&self) -> &str {
            "gives-up-late"
        }

        fn solve(&self, _request: &RoutingRequest) -> Option<RoutingSolution> {
            std::thread::sleep(self.0);
            None
        }
    }

    fn without_backend() -> Optimizer {
        Optimizer::with_backend(OptimizerConfig::default(), None).expect("valid config")
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OptimizerConfig::default().with_exact(ExactConfig::default().with_max_points(0));
        assert!(Optimizer::with_backend(config, None).is_err());
    }

    #[test]
    fn test_single_greedy() {
        let report = without_backend()
            .optimize(&four_points(), Selection::Single(StrategyKind::Greedy))
            .expect("valid matrix");
        assert_eq!(report.runs.len(), 1);
        assert_eq!(report.best, StrategyKind::Greedy);
        assert_eq!(report.best_tour().order(), &[0, 3, 2, 1, 0]);
        assert!(report.skipped.is_empty());
        assert_eq!(report.substitutions().count(), 0);
    }

    #[test]
    fn test_all_without_backend_skips_metaheuristic() {
        let optimizer = without_backend();
        assert!(!optimizer.has_backend());
        let report = optimizer
            .optimize(&four_points(), Selection::AllApplicable)
            .expect("valid matrix");

        assert!(report.get(StrategyKind::Exact).is_some());
        assert!(report.get(StrategyKind::Greedy).is_some());
        assert!(report.get(StrategyKind::Metaheuristic).is_none());
        assert_eq!(
            report.skipped,
            vec![SkippedStrategy {
                strategy: StrategyKind::Metaheuristic,
                reason: SolveError::BackendUnavailable,
            }]
        );
        assert!((report.best_cost() - 14.8).abs() < 1e-9);
    }

    #[test]
    fn test_exact_above_threshold_is_substituted() {
        let config = OptimizerConfig::default().with_exact(ExactConfig::default().with_max_points(5));
        let optimizer = Optimizer::with_backend(config, None).expect("valid config");
        let report = optimizer
            .optimize(&ring(8), Selection::Single(StrategyKind::Exact))
            .expect("valid matrix");

        let run = report.get(StrategyKind::Exact).expect("recorded under requested name");
        assert_eq!(run.used, StrategyKind::Greedy);
        assert!(run.is_substituted());
        assert_eq!(
            run.degradation,
            Some(SolveError::ThresholdExceeded { points: 8, max: 5 })
        );
        assert_eq!(report.best, StrategyKind::Exact);
        assert_eq!(report.best_run().used, StrategyKind::Greedy);
    }

    #[test]
    fn test_all_above_threshold_skips_exact() {
        let config = OptimizerConfig::default().with_exact(ExactConfig::default().with_max_points(5));
        let optimizer = Optimizer::with_backend(config, None).expect("valid config");
        let report = optimizer
            .optimize(&ring(8), Selection::AllApplicable)
            .expect("valid matrix");
        assert!(report.get(StrategyKind::Exact).is_none());
        assert!(report
            .skipped
            .iter()
            .any(|s| s.strategy == StrategyKind::Exact));
        assert_eq!(report.best, StrategyKind::Greedy);
        assert_eq!(report.best_cost(), 8.0);
    }

    #[test]
    fn test_metaheuristic_without_solution_degrades() {
        let config = OptimizerConfig::default()
            .with_metaheuristic(MetaheuristicConfig::default().with_time_limit(Duration::from_millis(50)));
        let optimizer =
            Optimizer::with_backend(config, Some(Arc::new(NeverSolves))).expect("valid config");
        assert!(optimizer.has_backend());

        let report = optimizer
            .optimize(&four_points(), Selection::Single(StrategyKind::Metaheuristic))
            .expect("valid matrix");
        let run = report.best_run();
        assert_eq!(run.requested, StrategyKind::Metaheuristic);
        assert_eq!(run.used, StrategyKind::Greedy);
        assert!(matches!(run.degradation, Some(SolveError::NoSolution { .. })));
    }

    #[test]
    fn test_substituted_run_counts_failed_attempt() {
        let config = OptimizerConfig::default()
            .with_metaheuristic(MetaheuristicConfig::default().with_time_limit(Duration::from_secs(5)));
        let backend = Arc::new(GivesUpLate(Duration::from_millis(300)));
        let optimizer = Optimizer::with_backend(config, Some(backend)).expect("valid config");

        let report = optimizer
            .optimize(&four_points(), Selection::Single(StrategyKind::Metaheuristic))
            .expect("valid matrix");
        let run = report.best_run();
        assert!(run.is_substituted());
        assert!(run.result.elapsed >= Duration::from_millis(300));
        assert!(report.elapsed >= run.result.elapsed);
    }

    #[cfg(all(feature = "parallel", feature = "annealing"))]
    #[test]
    fn test_parallel_matches_sequential() {
        let metaheuristic = MetaheuristicConfig::default()
            .with_time_limit(Duration::from_secs(2))
            .with_max_iterations(10_000)
            .with_seed(5);
        let config = OptimizerConfig::default().with_metaheuristic(metaheuristic);
        let sequential = Optimizer::new(config.clone().with_parallel(false)).expect("valid config");
        let parallel = Optimizer::new(config.with_parallel(true)).expect("valid config");

        let matrix = ring(8);
        let seq = sequential
            .optimize(&matrix, Selection::AllApplicable)
            .expect("valid matrix");
        let par = parallel
            .optimize(&matrix, Selection::AllApplicable)
            .expect("valid matrix");

        assert_eq!(par.runs.len(), 3);
        assert!(par.skipped.is_empty());
        assert_eq!(par.best, StrategyKind::Exact);
        assert_eq!(par.best_cost(), 8.0);
        for kind in [StrategyKind::Exact, StrategyKind::Greedy] {
            let (a, b) = (&seq.runs[&kind].result, &par.runs[&kind].result);
            assert_eq!(a.tour, b.tour);
            assert_eq!(a.total_cost, b.total_cost);
        }
        for run in par.runs.values() {
            let order = run.result.tour.order();
            assert_eq!(order.len(), 9);
            assert_eq!((order[0], order[8]), (0, 0));
            let mut stops = order[1..8].to_vec();
            stops.sort_unstable();
            assert_eq!(stops, (1..8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_metaheuristic_single_without_backend_degrades() {
        let report = without_backend()
            .optimize(&four_points(), Selection::Single(StrategyKind::Metaheuristic))
            .expect("valid matrix");
        let run = report.best_run();
        assert_eq!(run.used, StrategyKind::Greedy);
        assert_eq!(run.degradation, Some(SolveError::BackendUnavailable));
    }

    #[test]
    fn test_validation_error_stops_request() {
        let bad = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 2.0]]);
        let err = without_backend()
            .optimize(&bad, Selection::AllApplicable)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Diagonal { index: 1, .. }));
    }

    #[test]
    fn test_depot_only_has_no_savings() {
        let report = without_backend()
            .optimize(&DistanceMatrix::from_rows(vec![vec![0.0]]), Selection::AllApplicable)
            .expect("valid matrix");
        assert_eq!(report.best_tour().order(), &[0, 0]);
        assert_eq!(report.best_cost(), 0.0);
        assert!(report.savings.is_none());
    }

    #[test]
    fn test_savings_against_naive() {
        // Index order zig-zags across the ring; the optimum walks around it.
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 1.0, 10.0, 1.0],
            vec![10.0, 0.0, 1.0, 1.0, 10.0],
            vec![1.0, 1.0, 0.0, 10.0, 10.0],
            vec![10.0, 1.0, 10.0, 0.0, 1.0],
            vec![1.0, 10.0, 10.0, 1.0, 0.0],
        ]);
        let report = without_backend()
            .optimize(&m, Selection::AllApplicable)
            .expect("valid matrix");
        let savings = report.savings.expect("naive tour has a cost");
        assert_eq!(savings.naive_cost, 10.0 + 1.0 + 10.0 + 1.0 + 1.0);
        assert_eq!(savings.best_cost, 5.0);
        assert_eq!(savings.absolute_saving, 18.0);
        assert_eq!(savings.percentage_saving, 18.0 / 23.0 * 100.0);
        assert_eq!(report.best, StrategyKind::Exact);
    }

    #[test]
    fn test_summary_mentions_substitution() {
        let report = without_backend()
            .optimize(&four_points(), Selection::Single(StrategyKind::Metaheuristic))
            .expect("valid matrix");
        let text = report.to_string();
        assert!(text.contains("best strategy:  greedy"));
        assert!(text.contains("answered by greedy"));
        assert!(text.contains("14.80"));
    }
}
