//! Property tests over random distance matrices.

use proptest::prelude::*;
use std::time::Duration;
use u_tour::exact::ExactSolver;
use u_tour::greedy::GreedySolver;
use u_tour::matrix::DistanceMatrix;
use u_tour::metaheuristic::MetaheuristicConfig;
use u_tour::optimizer::{Optimizer, OptimizerConfig};
use u_tour::strategy::{Selection, TourStrategy};
use u_tour::tour::Tour;

/// Square matrices with a zero diagonal and arbitrary, possibly
/// asymmetric, off-diagonal costs.
fn matrix(max_points: usize) -> impl Strategy<Value = DistanceMatrix> {
    (1..=max_points).prop_flat_map(|n| {
        prop::collection::vec(0.0f64..100.0, n * n).prop_map(move |mut data| {
            for i in 0..n {
                data[i * n + i] = 0.0;
            }
            DistanceMatrix::from_data(n, &data).expect("n * n entries")
        })
    })
}

fn assert_closed_tour(tour: &Tour, points: usize) {
    let order = tour.order();
    assert_eq!(order.len(), points + 1);
    assert_eq!(order[0], 0);
    assert_eq!(order[points], 0);

    let mut interior: Vec<usize> = order[1..points].to_vec();
    interior.sort_unstable();
    assert_eq!(interior, (1..points).collect::<Vec<_>>());
}

proptest! {
    #[test]
    fn greedy_is_deterministic(m in matrix(12)) {
        let validated = m.validate().expect("generated matrices are valid");
        let first = GreedySolver.run(&validated);
        let second = GreedySolver.run(&validated);
        prop_assert_eq!(&first.tour, &second.tour);
        prop_assert_eq!(first.total_cost, second.total_cost);
        assert_closed_tour(&first.tour, m.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn exact_never_worse_than_greedy(m in matrix(10)) {
        let validated = m.validate().expect("generated matrices are valid");
        let exact = ExactSolver::default().solve(&validated).expect("within limit");
        let greedy = GreedySolver.run(&validated);
        prop_assert!(exact.total_cost <= greedy.total_cost);
        prop_assert_eq!(exact.total_cost, exact.tour.cost(&validated));
    }

    #[test]
    fn every_reported_tour_is_closed(m in matrix(9)) {
        let config = OptimizerConfig::default().with_metaheuristic(
            MetaheuristicConfig::default()
                .with_time_limit(Duration::from_millis(500))
                .with_max_iterations(5_000)
                .with_seed(11),
        );
        let optimizer = Optimizer::new(config).expect("valid config");
        let report = optimizer
            .optimize(&m, Selection::AllApplicable)
            .expect("generated matrices are valid");
        let validated = m.validate().expect("generated matrices are valid");

        for run in report.runs.values() {
            assert_closed_tour(&run.result.tour, m.len());
            prop_assert_eq!(run.result.total_cost, run.result.tour.cost(&validated));
            prop_assert!(run.result.total_cost >= report.best_cost());
        }

        match report.savings {
            Some(s) => {
                prop_assert!(s.naive_cost > 0.0);
                prop_assert_eq!(s.naive_cost, report.naive_tour.cost(&validated));
                prop_assert_eq!(s.best_cost, report.best_cost());
                prop_assert_eq!(
                    s.percentage_saving,
                    (s.naive_cost - s.best_cost) / s.naive_cost * 100.0
                );
            }
            None => prop_assert_eq!(report.naive_tour.cost(&validated), 0.0),
        }
    }
}
