//! Ant System loop: construct, evaporate, deposit.

use super::config::AcoConfig;
use crate::instance::ProblemInstance;
use crate::random::rng_from;
use crate::route::open_path_cost;
use crate::termination::Termination;
use rand::Rng;

/// Keeps `1 / distance` and `Q / cost` finite on zero-length edges and tours.
const EPSILON: f64 = 1e-10;

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Best route over all iterations.
    pub best_route: Vec<usize>,

    /// Open-path cost of `best_route`.
    pub best_cost: f64,

    /// Iterations completed.
    pub iterations: usize,

    /// Whether the run was stopped by its termination condition.
    pub cancelled: bool,

    /// Global best cost after each iteration.
    pub cost_history: Vec<f64>,
}

/// Executes Ant Colony Optimization over a [`ProblemInstance`].
pub struct AcoRunner;

impl AcoRunner {
    /// Runs ACO for `max_iterations`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tour::aco::{AcoConfig, AcoRunner};
    /// use u_tour::instance::ProblemInstance;
    ///
    /// let pos = [0.0f64, 2.0, 1.0, 3.0];
    /// let m: Vec<Vec<f64>> = pos
    ///     .iter()
    ///     .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
    ///     .collect();
    /// let instance = ProblemInstance::new(m, 0).unwrap();
    ///
    /// let result = AcoRunner::run(&instance, &AcoConfig::default().with_seed(1)).unwrap();
    /// assert!((result.best_cost - 3.0).abs() < 1e-12);
    /// ```
    pub fn run(instance: &ProblemInstance, config: &AcoConfig) -> Result<AcoResult, String> {
        Self::run_with_cancel(instance, config, &Termination::none())
    }

    /// Runs ACO, stopping at an iteration boundary when `termination` fires.
    ///
    /// A run cancelled before its first iteration still completes one so
    /// that a route is always returned.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &AcoConfig,
        termination: &Termination,
    ) -> Result<AcoResult, String> {
        config.validate()?;
        let termination = termination.clone().with_time_limit_ms(config.time_limit_ms);
        let mut rng = rng_from(config.seed);

        let n = instance.len();
        let mut pheromone = PheromoneMatrix::new(n, config.initial_pheromone);
        let mut best: Option<(Vec<usize>, f64)> = None;
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut iterations = 0;
        let mut cancelled = false;

        while iterations < config.max_iterations {
            if iterations > 0 && termination.should_stop() {
                cancelled = true;
                break;
            }

            let tours: Vec<(Vec<usize>, f64)> = (0..config.num_ants)
                .map(|_| {
                    let route = construct_route(instance, &pheromone, config, &mut rng);
                    let cost = open_path_cost(&route, instance);
                    (route, cost)
                })
                .collect();

            for (route, cost) in &tours {
                if best.as_ref().is_none_or(|(_, b)| *cost < *b) {
                    best = Some((route.clone(), *cost));
                }
            }

            pheromone.evaporate(config.evaporation_rate);
            for (route, cost) in &tours {
                pheromone.deposit(route, config.deposit / (cost + EPSILON));
            }

            iterations += 1;
            if let Some((_, cost)) = best {
                cost_history.push(cost);
            }
        }

        let (best_route, best_cost) = best.ok_or("no ant completed a route")?;
        Ok(AcoResult {
            best_route,
            best_cost,
            iterations,
            cancelled,
            cost_history,
        })
    }
}

/// Symmetric pheromone levels on every edge.
#[derive(Debug, Clone)]
struct PheromoneMatrix {
    levels: Vec<Vec<f64>>,
}

impl PheromoneMatrix {
    fn new(n: usize, initial: f64) -> Self {
        Self {
            levels: vec![vec![initial; n]; n],
        }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.levels[i][j]
    }

    /// `tau *= 1 - rho` on every edge.
    fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for row in &mut self.levels {
            for tau in row.iter_mut() {
                *tau *= keep;
            }
        }
    }

    /// Adds `amount` to both directions of every edge of `route`.
    fn deposit(&mut self, route: &[usize], amount: f64) {
        for w in route.windows(2) {
            self.levels[w[0]][w[1]] += amount;
            self.levels[w[1]][w[0]] += amount;
        }
    }
}

/// One ant's walk from the start node.
fn construct_route<R: Rng>(
    instance: &ProblemInstance,
    pheromone: &PheromoneMatrix,
    config: &AcoConfig,
    rng: &mut R,
) -> Vec<usize> {
    let n = instance.len();
    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);

    let mut current = instance.start();
    visited[current] = true;
    route.push(current);

    let mut candidates: Vec<usize> = Vec::with_capacity(n);
    let mut weights: Vec<f64> = Vec::with_capacity(n);

    while route.len() < n {
        candidates.clear();
        weights.clear();
        for node in (0..n).filter(|&v| !visited[v]) {
            let tau = pheromone.get(current, node).powf(config.alpha);
            let eta = (1.0 / (instance.distance(current, node) + EPSILON)).powf(config.beta);
            candidates.push(node);
            weights.push(tau * eta);
        }

        let next = candidates[sample_index(&weights, rng)];
        visited[next] = true;
        route.push(next);
        current = next;
    }

    route
}

/// Roulette-wheel index over `weights`; uniform when the weights are degenerate.
fn sample_index<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.random_range(0..weights.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::route::test_support::{scrambled_circle, unit_square};
    use crate::route::is_valid_route;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[test]
    fn test_square_finds_perimeter() {
        let instance = unit_square(2);
        let config = AcoConfig::default().with_seed(4);
        let result = AcoRunner::run(&instance, &config).expect("valid config");
        assert!((result.best_cost - 3.0).abs() < 1e-12);
        assert!(is_valid_route(&result.best_route, 4, 2));
    }

    #[test]
    fn test_circle_routes_are_valid_and_improve() {
        let instance = scrambled_circle(12, 0);
        let config = AcoConfig::default().with_max_iterations(60).with_seed(17);
        let result = AcoRunner::run(&instance, &config).expect("valid config");
        assert!(is_valid_route(&result.best_route, 12, 0));
        assert!((result.best_cost - open_path_cost(&result.best_route, &instance)).abs() < 1e-9);
        assert!(result.best_cost <= result.cost_history[0]);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let instance = scrambled_circle(9, 1);
        let config = AcoConfig::default().with_max_iterations(20).with_seed(3);
        let a = AcoRunner::run(&instance, &config).expect("valid config");
        let b = AcoRunner::run(&instance, &config).expect("valid config");
        assert_eq!(a.best_route, b.best_route);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_history_is_non_increasing() {
        let instance = scrambled_circle(10, 0);
        let config = AcoConfig::default().with_max_iterations(30).with_seed(8);
        let result = AcoRunner::run(&instance, &config).expect("valid config");
        assert_eq!(result.cost_history.len(), 30);
        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_cancel_still_returns_a_route() {
        let instance = scrambled_circle(8, 3);
        let stop = Termination::none().with_cancel(Arc::new(AtomicBool::new(true)));
        let config = AcoConfig::default().with_seed(1);
        let result = AcoRunner::run_with_cancel(&instance, &config, &stop).expect("valid config");
        assert!(result.cancelled);
        assert_eq!(result.iterations, 1);
        assert!(is_valid_route(&result.best_route, 8, 3));
    }

    #[test]
    fn test_single_node() {
        let instance = ProblemInstance::new(vec![vec![0.0]], 0).expect("valid");
        let config = AcoConfig::default().with_seed(1);
        let result = AcoRunner::run(&instance, &config).expect("valid config");
        assert_eq!(result.best_route, vec![0]);
        assert_eq!(result.best_cost, 0.0);
    }

    #[test]
    fn test_evaporate_then_deposit() {
        let mut tau = PheromoneMatrix::new(3, 1.0);
        tau.evaporate(0.25);
        tau.deposit(&[0, 2, 1], 2.0);
        assert!((tau.get(0, 2) - 2.75).abs() < 1e-12);
        assert!((tau.get(2, 0) - 2.75).abs() < 1e-12);
        assert!((tau.get(1, 2) - 2.75).abs() < 1e-12);
        assert!((tau.get(0, 1) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sample_index_degenerate_weights() {
        let mut rng = create_rng(0);
        for _ in 0..50 {
            assert!(sample_index(&[0.0, 0.0, 0.0], &mut rng) < 3);
            assert!(sample_index(&[f64::INFINITY, 1.0], &mut rng) < 2);
        }
        assert_eq!(sample_index(&[0.0, 5.0, 0.0], &mut rng), 1);
    }
}
