//! Nearest-neighbour construction.

use crate::error::SolveError;
use crate::matrix::ValidatedMatrix;
use crate::strategy::{StrategyKind, StrategyResult, TourStrategy};
use crate::tour::{Tour, DEPOT};
use std::time::Instant;
use tracing::debug;

/// Visiting order produced by nearest-neighbour construction.
///
/// `cost(from, to)` is consulted for every candidate; ties go to the
/// lowest index. Returns the stops only, depot excluded.
///
/// # Examples
///
/// ```
/// use u_tour::greedy::nearest_neighbor_order;
///
/// let d = [[0, 4, 1], [4, 0, 2], [1, 2, 0]];
/// assert_eq!(nearest_neighbor_order(3, |a, b| d[a][b]), vec![2, 1]);
/// ```
pub fn nearest_neighbor_order<C, F>(points: usize, cost: F) -> Vec<usize>
where
    C: PartialOrd,
    F: Fn(usize, usize) -> C,
{
    let mut visited = vec![false; points];
    let mut order = Vec::with_capacity(points.saturating_sub(1));
    let mut current = DEPOT;
    if points > 0 {
        visited[DEPOT] = true;
    }

    while order.len() + 1 < points {
        let mut next: Option<(usize, C)> = None;
        for candidate in 1..points {
            if visited[candidate] {
                continue;
            }
            let c = cost(current, candidate);
            let closer = match &next {
                None => true,
                Some((_, best)) => c < *best,
            };
            if closer {
                next = Some((candidate, c));
            }
        }
        match next {
            Some((stop, _)) => {
                visited[stop] = true;
                order.push(stop);
                current = stop;
            }
            None => break,
        }
    }
    order
}

/// The guaranteed fallback strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl GreedySolver {
    /// Builds the nearest-neighbour tour. Infallible for any validated matrix.
    pub fn run(&self, matrix: &ValidatedMatrix) -> StrategyResult {
        let start = Instant::now();
        let stops = nearest_neighbor_order(matrix.size(), |a, b| matrix.get(a, b));

        let mut order = Vec::with_capacity(stops.len() + 2);
        order.push(DEPOT);
        order.extend(stops);
        order.push(DEPOT);
        let total_cost = matrix.path_cost(&order);
        let tour = Tour::new(order)
            .unwrap_or_else(|_| unreachable!("nearest neighbour visits every stop once"));
        let elapsed = start.elapsed();

        debug!(points = matrix.size(), cost = total_cost, ?elapsed, "greedy tour built");
        StrategyResult::new(tour, total_cost, elapsed)
    }
}

impl TourStrategy for GreedySolver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }

    fn solve(&self, matrix: &ValidatedMatrix) -> Result<StrategyResult, SolveError> {
        Ok(self.run(matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DistanceMatrix;

    fn validated(rows: Vec<Vec<f64>>) -> ValidatedMatrix {
        DistanceMatrix::from_rows(rows).validate().expect("valid")
    }

    #[test]
    fn test_greedy_four_points() {
        let m = validated(vec![
            vec![0.0, 5.2, 3.1, 2.8],
            vec![5.2, 0.0, 4.5, 6.1],
            vec![3.1, 4.5, 0.0, 2.3],
            vec![2.8, 6.1, 2.3, 0.0],
        ]);
        let result = GreedySolver.run(&m);
        assert_eq!(result.tour.order(), &[0, 3, 2, 1, 0]);
        assert!((result.total_cost - 14.8).abs() < 1e-9);
        assert_eq!(result.stop_count, 4);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let m = validated(vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ]);
        assert_eq!(GreedySolver.run(&m).tour.order(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_follows_outgoing_costs() {
        let m = validated(vec![
            vec![0.0, 9.0, 1.0],
            vec![1.0, 0.0, 9.0],
            vec![9.0, 1.0, 0.0],
        ]);
        let result = GreedySolver.run(&m);
        assert_eq!(result.tour.order(), &[0, 2, 1, 0]);
        assert_eq!(result.total_cost, 3.0);
    }

    #[test]
    fn test_depot_only_and_single_stop() {
        let result = GreedySolver.run(&validated(vec![vec![0.0]]));
        assert_eq!(result.tour.order(), &[0, 0]);
        assert_eq!(result.total_cost, 0.0);

        let result = GreedySolver.run(&validated(vec![vec![0.0, 5.0], vec![5.0, 0.0]]));
        assert_eq!(result.tour.order(), &[0, 1, 0]);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn test_order_on_integer_costs() {
        let d = [[0i64, 3, 3], [3, 0, 1], [3, 1, 0]];
        assert_eq!(nearest_neighbor_order(3, |a, b| d[a][b]), vec![1, 2]);
        assert!(nearest_neighbor_order(0, |a, b| d[a][b]).is_empty());
        assert!(nearest_neighbor_order(1, |a, b| d[a][b]).is_empty());
    }
}
