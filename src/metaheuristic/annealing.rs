//! Built-in backend: cheapest-arc construction, simulated annealing,
//! then a 2-opt / relocate descent.
//!
//! # Algorithm
//!
//! 1. **First solution**: from the depot, repeatedly extend the path
//!    along the cheapest arc to an unvisited node.
//! 2. **Annealing**: [`SaRunner`] over three move types on the stop
//!    sequence (segment reversal, relocation, exchange). The starting
//!    temperature is the mean arc cost of the first solution.
//! 3. **Descent**: first-improvement 2-opt and relocate passes until no
//!    move improves the route.
//!
//! Every phase stops as soon as the deadline passes or the request's
//! cancellation flag is raised; the best route found so far is returned.
//! Costs are re-evaluated in full for each move so asymmetric callbacks
//! are handled correctly.
//!
//! # References
//!
//! - Croes (1958), "A method for solving traveling salesman problems"
//! - Or (1976), relocation moves for the TSP

use super::backend::{CostCallback, RoutingBackend, RoutingRequest, RoutingSolution};
use crate::greedy::nearest_neighbor_order;
use crate::sa::{CoolingSchedule, SaConfig, SaProblem, SaRunner};
use crate::tour::DEPOT;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Simulated-annealing routing backend.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use u_tour::metaheuristic::{AnnealingBackend, RoutingBackend, RoutingRequest};
///
/// let d = [[0i64, 3, 4], [3, 0, 5], [4, 5, 0]];
/// let request = RoutingRequest {
///     nodes: 3,
///     vehicles: 1,
///     depot: 0,
///     cost: Arc::new(move |a: usize, b: usize| d[a][b]),
///     time_limit: Duration::from_secs(1),
///     max_iterations: 1_000,
///     seed: Some(1),
///     cancel: Arc::new(AtomicBool::new(false)),
/// };
/// let solution = AnnealingBackend::default().solve(&request).unwrap();
/// assert_eq!(solution.objective, 12);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingBackend {
    cooling: CoolingSchedule,
    moves_per_stop: usize,
}

impl Default for AnnealingBackend {
    fn default() -> Self {
        Self {
            cooling: CoolingSchedule::Geometric { alpha: 0.97 },
            moves_per_stop: 20,
        }
    }
}

impl AnnealingBackend {
    /// Sets the cooling schedule.
    ///
    /// The starting temperature is the mean arc cost of the first
    /// solution in the scaled integer domain, and the search stops at a
    /// thousandth of it; a `LundyMees` beta is expressed in those units.
    /// `Linear` spreads the cooling over the request's iteration cap.
    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    /// Sets how many moves are tried per stop at each temperature level.
    pub fn with_moves_per_stop(mut self, n: usize) -> Self {
        self.moves_per_stop = n.max(1);
        self
    }
}

impl RoutingBackend for AnnealingBackend {
    fn name(&self) -> &str {
        "annealing"
    }

    fn solve(&self, request: &RoutingRequest) -> Option<RoutingSolution> {
        let start = Instant::now();
        if request.vehicles != 1 || request.depot != DEPOT || request.nodes == 0 {
            debug!(?request, "unsupported routing request");
            return None;
        }
        if request.time_limit.is_zero() || request.cancel.load(Ordering::Relaxed) {
            return None;
        }

        let cost: &CostCallback<'_> = &*request.cost;
        let deadline = start + request.time_limit;
        let mut stops = nearest_neighbor_order(request.nodes, |a, b| cost(a, b));
        let first_objective = sequence_cost(&stops, cost);

        if stops.len() >= 2 {
            let legs = stops.len() + 1;
            let initial_temperature = (first_objective as f64 / legs as f64).max(1.0);
            let config = SaConfig::default()
                .with_initial_temperature(initial_temperature)
                .with_min_temperature(initial_temperature * 1e-3)
                .with_cooling(self.cooling)
                .with_iterations_per_temperature(self.moves_per_stop * stops.len())
                .with_max_iterations(request.max_iterations)
                .with_time_limit(request.time_limit.saturating_sub(start.elapsed()));
            let config = match request.seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };

            let problem = StopSequence {
                cost,
                initial: stops.clone(),
            };
            match SaRunner::run_with_cancel(&problem, &config, Some(request.cancel.clone())) {
                Ok(result) => {
                    debug!(
                        iterations = result.iterations,
                        stop = ?result.stop_reason,
                        best = result.best_cost,
                        "annealing finished"
                    );
                    if (result.best_cost as i64) < first_objective {
                        stops = result.best;
                    }
                }
                Err(e) => warn!(error = %e, "annealing skipped"),
            }

            descend(&mut stops, cost, deadline, &request.cancel);
        }

        let mut route = Vec::with_capacity(stops.len() + 2);
        route.push(DEPOT);
        route.extend(stops);
        route.push(DEPOT);
        let objective = route
            .windows(2)
            .try_fold(0i64, |acc, w| acc.checked_add(cost(w[0], w[1])))?;

        Some(RoutingSolution { route, objective })
    }
}

/// Stop order between the two depot visits.
struct StopSequence<'a> {
    cost: &'a CostCallback<'a>,
    initial: Vec<usize>,
}

impl SaProblem for StopSequence<'_> {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
        self.initial.clone()
    }

    fn cost(&self, stops: &Vec<usize>) -> f64 {
        sequence_cost(stops, self.cost) as f64
    }

    fn neighbor<R: Rng>(&self, stops: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let mut new = stops.clone();
        let m = new.len();
        let i = rng.random_range(0..m);
        let mut j = rng.random_range(0..m - 1);
        if j >= i {
            j += 1;
        }
        match rng.random_range(0..3) {
            0 => {
                let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                new[lo..=hi].reverse();
            }
            1 => {
                let stop = new.remove(i);
                new.insert(j, stop);
            }
            _ => new.swap(i, j),
        }
        new
    }
}

/// Closed-route cost of `depot → stops → depot`, saturating on overflow.
fn sequence_cost(stops: &[usize], cost: &CostCallback<'_>) -> i64 {
    let mut total = 0i64;
    let mut prev = DEPOT;
    for &s in stops {
        total = total.saturating_add(cost(prev, s));
        prev = s;
    }
    total.saturating_add(cost(prev, DEPOT))
}

fn expired(deadline: Instant, cancel: &AtomicBool) -> bool {
    cancel.load(Ordering::Relaxed) || Instant::now() >= deadline
}

/// First-improvement 2-opt and relocate descent.
fn descend(stops: &mut Vec<usize>, cost: &CostCallback<'_>, deadline: Instant, cancel: &AtomicBool) {
    let m = stops.len();
    let mut current = sequence_cost(stops, cost);
    let mut improved = true;

    while improved {
        improved = false;

        for i in 0..m.saturating_sub(1) {
            if expired(deadline, cancel) {
                return;
            }
            for j in (i + 1)..m {
                stops[i..=j].reverse();
                let candidate = sequence_cost(stops, cost);
                if candidate < current {
                    current = candidate;
                    improved = true;
                } else {
                    stops[i..=j].reverse();
                }
            }
        }

        for i in 0..m {
            if expired(deadline, cancel) {
                return;
            }
            for j in 0..m {
                if i == j {
                    continue;
                }
                let stop = stops.remove(i);
                stops.insert(j, stop);
                let candidate = sequence_cost(stops, cost);
                if candidate < current {
                    current = candidate;
                    improved = true;
                } else {
                    let stop = stops.remove(j);
                    stops.insert(i, stop);
                }
            }
        }
    }
}
