//! Route annealing: nearest-neighbor start, random 2-opt moves.

use super::types::SaProblem;
use crate::instance::ProblemInstance;
use crate::route::{nearest_neighbor, open_path_cost};
use rand::Rng;

/// Anneals routes over a [`ProblemInstance`].
///
/// # Examples
///
/// ```
/// use u_tour::instance::ProblemInstance;
/// use u_tour::sa::{SaConfig, SaRunner, TourAnnealing};
///
/// let pos = [0.0f64, 3.0, 1.0, 2.0];
/// let m: Vec<Vec<f64>> = pos
///     .iter()
///     .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
///     .collect();
/// let instance = ProblemInstance::new(m, 0).unwrap();
///
/// let problem = TourAnnealing::new(&instance);
/// let result = SaRunner::run(&problem, &SaConfig::default().with_seed(1)).unwrap();
/// assert!((result.best_cost - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TourAnnealing<'a> {
    instance: &'a ProblemInstance,
    seed_route: Option<Vec<usize>>,
}

impl<'a> TourAnnealing<'a> {
    /// Starts from the nearest-neighbor route.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            seed_route: None,
        }
    }

    /// Starts from `route` instead. The route must satisfy the route invariant.
    pub fn with_seed_route(mut self, route: Vec<usize>) -> Self {
        self.seed_route = Some(route);
        self
    }
}

impl SaProblem for TourAnnealing<'_> {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
        match self.seed_route {
            Some(ref route) => route.clone(),
            None => nearest_neighbor(self.instance),
        }
    }

    fn cost(&self, route: &Vec<usize>) -> f64 {
        open_path_cost(route, self.instance)
    }

    /// Reverses `route[i..=j]` for `i` uniform in `[1, n-2]` and `j` uniform in `[i+1, n-1]`.
    fn neighbor<R: Rng>(&self, route: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let n = route.len();
        let mut next = route.clone();
        if n < 3 {
            return next;
        }
        let i = rng.random_range(1..n - 1);
        let j = rng.random_range(i + 1..n);
        next[i..=j].reverse();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::route::is_valid_route;
    use crate::route::test_support::{scrambled_circle, unit_square};
    use crate::sa::{SaConfig, SaRunner};

    #[test]
    fn test_neighbor_keeps_start_fixed() {
        let instance = scrambled_circle(9, 4);
        let problem = TourAnnealing::new(&instance);
        let mut rng = create_rng(5);
        let mut route = problem.initial_solution(&mut rng);
        for _ in 0..500 {
            route = problem.neighbor(&route, &mut rng);
            assert!(is_valid_route(&route, 9, 4));
        }
    }

    #[test]
    fn test_never_worse_than_nearest_neighbor() {
        let instance = scrambled_circle(12, 0);
        let nn_cost = open_path_cost(&nearest_neighbor(&instance), &instance);
        let problem = TourAnnealing::new(&instance);
        let config = SaConfig::default().with_seed(9);
        let result = SaRunner::run(&problem, &config).expect("valid config");
        assert!(result.best_cost <= nn_cost + 1e-12);
        assert!(is_valid_route(&result.best, 12, 0));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let instance = scrambled_circle(10, 2);
        let config = SaConfig::default().with_seed(77);
        let a = SaRunner::run(&TourAnnealing::new(&instance), &config).expect("valid config");
        let b = SaRunner::run(&TourAnnealing::new(&instance), &config).expect("valid config");
        assert_eq!(a.best, b.best);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_seed_route_used() {
        let instance = unit_square(0);
        let problem = TourAnnealing::new(&instance).with_seed_route(vec![0, 2, 1, 3]);
        let mut rng = create_rng(0);
        assert_eq!(problem.initial_solution(&mut rng), vec![0, 2, 1, 3]);

        let config = SaConfig::default().with_seed(1);
        let result = SaRunner::run(&problem, &config).expect("valid config");
        assert!((result.best_cost - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_nodes_is_fixed_point() {
        let instance = unit_square(3);
        let m: Vec<Vec<f64>> = vec![
            vec![0.0, instance.distance(3, 0)],
            vec![instance.distance(0, 3), 0.0],
        ];
        let pair = ProblemInstance::new(m, 1).expect("valid");
        let result = SaRunner::run(&TourAnnealing::new(&pair), &SaConfig::default().with_seed(1))
            .expect("valid config");
        assert_eq!(result.best, vec![1, 0]);
        assert_eq!(result.improving_moves, 0);
    }
}
