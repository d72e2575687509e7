//! Property-based tests for the ensemble and its kernels.
//!
//! Uses proptest to check route invariants over random planar instances.

use proptest::prelude::*;
use u_tour::ensemble::{Algorithm, Ensemble, EnsembleConfig, NotRun};
use u_tour::instance::ProblemInstance;
use u_tour::local_search::{three_opt_improve, two_opt_improve};
use u_tour::route::{is_valid_route, nearest_neighbor, open_path_cost};
use u_tour::termination::Termination;

// ============================================================================
// Instance Generation
// ============================================================================

fn euclidean(points: &[(f64, f64)], start: usize) -> ProblemInstance {
    let n = points.len();
    let mut m = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
            let d = (dx * dx + dy * dy).sqrt();
            m[i][j] = d;
            m[j][i] = d;
        }
    }
    ProblemInstance::new(m, start).unwrap()
}

/// Random instance with 1-11 nodes and a random start.
fn random_instance() -> impl Strategy<Value = ProblemInstance> {
    (1usize..12)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((0.0..100.0f64, 0.0..100.0f64), n),
                0..n,
            )
        })
        .prop_map(|(points, start)| euclidean(&points, start))
}

fn ensemble(seed: u64) -> Ensemble {
    Ensemble::new(EnsembleConfig::fast().with_seed(seed)).unwrap()
}

// ============================================================================
// Ensemble Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_every_result_is_a_valid_route(instance in random_instance(), seed in any::<u64>()) {
        let report = ensemble(seed).optimize(&instance);
        let n = instance.len();
        prop_assert!(!report.results.is_empty());
        for r in &report.results {
            prop_assert!(is_valid_route(&r.route.route, n, instance.start()), "{}", r.algorithm);
            prop_assert!(r.cost().is_finite());
        }
        prop_assert!(is_valid_route(report.route(), n, instance.start()));
    }

    #[test]
    fn prop_never_worse_than_nearest_neighbor(instance in random_instance(), seed in any::<u64>()) {
        let nn = open_path_cost(&nearest_neighbor(&instance), &instance);
        let report = ensemble(seed).optimize(&instance);
        prop_assert!(report.cost() <= nn + 1e-9, "{} > {}", report.cost(), nn);
    }

    #[test]
    fn prop_seeded_runs_reproduce(instance in random_instance(), seed in any::<u64>()) {
        let a = ensemble(seed).optimize(&instance);
        let b = ensemble(seed).optimize(&instance);
        prop_assert_eq!(a.comparison(), b.comparison());
        prop_assert_eq!(a.route(), b.route());
    }

    #[test]
    fn prop_winner_is_cheapest(instance in random_instance(), seed in any::<u64>()) {
        let report = ensemble(seed).optimize(&instance);
        for r in &report.results {
            prop_assert!(report.cost() <= r.cost());
        }
    }
}

// ============================================================================
// Kernel Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_two_opt_is_idempotent(instance in random_instance()) {
        let never = Termination::none();
        let once = two_opt_improve(&nearest_neighbor(&instance), &instance, 1_000, &never);
        let twice = two_opt_improve(&once.route, &instance, 1_000, &never);
        prop_assert_eq!(twice.improvements, 0);
        prop_assert_eq!(&twice.route, &once.route);
    }

    #[test]
    fn prop_three_opt_is_idempotent(instance in random_instance()) {
        let never = Termination::none();
        let once = three_opt_improve(&nearest_neighbor(&instance), &instance, 1_000, &never);
        let twice = three_opt_improve(&once.route, &instance, 1_000, &never);
        prop_assert_eq!(twice.improvements, 0);
        prop_assert_eq!(&twice.route, &once.route);
    }

    #[test]
    fn prop_local_search_never_worsens(instance in random_instance()) {
        let seed = nearest_neighbor(&instance);
        let before = open_path_cost(&seed, &instance);
        let two = two_opt_improve(&seed, &instance, 100, &Termination::none());
        let three = three_opt_improve(&seed, &instance, 50, &Termination::none());
        prop_assert!(two.cost <= before + 1e-9);
        prop_assert!(three.cost <= before + 1e-9);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn unit_square_costs_three() {
    let instance = euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], 0);
    let orders = [[0, 2, 1, 3], [0, 2, 3, 1], [0, 1, 3, 2], [0, 3, 1, 2]];
    for order in orders {
        let result = two_opt_improve(&order, &instance, 100, &Termination::none());
        assert!((result.cost - 3.0).abs() < 1e-12, "{order:?} -> {}", result.cost);
    }
    let report = ensemble(1).optimize(&instance);
    assert!((report.cost() - 3.0).abs() < 1e-9);
}

#[test]
fn single_node() {
    let instance = ProblemInstance::new(vec![vec![0.0]], 0).unwrap();
    let report = ensemble(1).optimize(&instance);
    assert_eq!(report.route(), &[0]);
    assert_eq!(report.cost(), 0.0);
    for r in &report.results {
        assert_eq!(r.route.route, vec![0]);
    }
}

#[test]
fn two_nodes_every_algorithm_agrees() {
    let instance = ProblemInstance::new(vec![vec![0.0, 7.5], vec![7.5, 0.0]], 1).unwrap();
    let report = ensemble(1).optimize(&instance);
    assert_eq!(report.route(), &[1, 0]);
    assert_eq!(report.cost(), 7.5);
    for r in &report.results {
        assert_eq!(r.route.route, vec![1, 0], "{}", r.algorithm);
        assert_eq!(r.cost(), 7.5);
    }
}

#[test]
fn three_nodes_without_gated_algorithms() {
    let instance = euclidean(&[(0.0, 0.0), (5.0, 1.0), (2.0, 3.0)], 2);
    let config = EnsembleConfig::fast().with_seed(9).with_gates(u_tour::ensemble::SizeGates {
        candidate_max_nodes: 0,
        genetic_min_nodes: 5,
        ant_colony_min_nodes: 4,
    });
    let report = Ensemble::new(config).unwrap().optimize(&instance);

    for algorithm in [
        Algorithm::NearestNeighbor,
        Algorithm::TwoOpt,
        Algorithm::ThreeOpt,
        Algorithm::SimulatedAnnealing,
    ] {
        assert!(report.result(algorithm).is_some(), "{algorithm} missing");
    }
    assert_eq!(report.results.len(), 4);
    assert!(report.skipped.iter().all(|s| s.reason == NotRun::SizeGated));
    assert!(!report.fallback);
}

#[test]
fn invalid_instances_are_rejected() {
    assert!(ProblemInstance::new(vec![], 0).is_err());
    assert!(ProblemInstance::new(vec![vec![0.0, 1.0], vec![2.0, 0.0]], 0).is_err());
    assert!(ProblemInstance::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]], 2).is_err());
    assert!(ProblemInstance::new(vec![vec![0.0, 1.0]], 0).is_err());
}
