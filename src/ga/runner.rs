//! Generational GA loop.

use super::config::GaConfig;
use super::types::{GaProblem, Individual};
use crate::random::rng_from;
use crate::termination::Termination;
use rand::Rng;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// Cheapest individual of the final population.
    pub best: I,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Generations completed.
    pub generations: usize,

    /// Whether the run was stopped by its termination condition.
    pub cancelled: bool,

    /// Cheapest cost in the population after initialization and after each generation.
    pub cost_history: Vec<f64>,
}

/// Executes the GA.
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA for `max_generations`.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, String> {
        Self::run_with_cancel(problem, config, &Termination::none())
    }

    /// Runs the GA, stopping at a generation boundary when `termination` fires.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        termination: &Termination,
    ) -> Result<GaResult<P::Individual>, String> {
        config.validate()?;
        let termination = termination.clone().with_time_limit_ms(config.time_limit_ms);
        let mut rng = rng_from(config.seed);

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate(problem, &mut population, config.parallel);

        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(cheapest(&population)?.1);

        let mut generations = 0;
        let mut cancelled = false;

        while generations < config.max_generations {
            if termination.should_stop() {
                cancelled = true;
                break;
            }

            let mut next: Vec<P::Individual> = Vec::with_capacity(config.population_size);
            if config.elite_count > 0 {
                let mut ranked: Vec<&P::Individual> = population.iter().collect();
                ranked.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
                next.extend(ranked.into_iter().take(config.elite_count).cloned());
            }
            let elites = next.len();

            while next.len() < config.population_size {
                let p1 = config
                    .selection
                    .select(&population, &mut rng)
                    .ok_or("population is empty")?;
                let p2 = config
                    .selection
                    .select(&population, &mut rng)
                    .ok_or("population is empty")?;

                let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&population[p1], &population[p2], &mut rng)
                } else {
                    population[p1].clone()
                };
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    problem.mutate(&mut child, &mut rng);
                }
                next.push(child);
            }

            evaluate(problem, &mut next[elites..], config.parallel);
            population = next;
            generations += 1;
            cost_history.push(cheapest(&population)?.1);
        }

        let (index, best_cost) = cheapest(&population)?;
        Ok(GaResult {
            best: population.swap_remove(index),
            best_cost,
            generations,
            cancelled,
            cost_history,
        })
    }
}

#[cfg(feature = "parallel")]
fn evaluate<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let cost = problem.evaluate(ind);
            ind.set_cost(cost);
        });
    } else {
        evaluate_serial(problem, individuals);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], _parallel: bool) {
    evaluate_serial(problem, individuals);
}

fn evaluate_serial<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    for ind in individuals.iter_mut() {
        let cost = problem.evaluate(ind);
        ind.set_cost(cost);
    }
}

/// Index and cost of the cheapest individual.
fn cheapest<I: Individual>(population: &[I]) -> Result<(usize, f64), String> {
    population
        .iter()
        .enumerate()
        .map(|(i, ind)| (i, ind.cost()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or_else(|| "population is empty".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    // OneMax: minimize the number of zero bits.
    #[derive(Clone, Debug)]
    struct Bits {
        bits: Vec<bool>,
        cost: f64,
    }

    impl Individual for Bits {
        fn cost(&self) -> f64 {
            self.cost
        }
        fn set_cost(&mut self, cost: f64) {
            self.cost = cost;
        }
    }

    struct OneMax {
        n: usize,
    }

    impl GaProblem for OneMax {
        type Individual = Bits;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Bits {
            Bits {
                bits: (0..self.n).map(|_| rng.random_bool(0.5)).collect(),
                cost: f64::INFINITY,
            }
        }

        fn evaluate(&self, ind: &Bits) -> f64 {
            ind.bits.iter().filter(|&&b| !b).count() as f64
        }

        fn crossover<R: Rng>(&self, p1: &Bits, p2: &Bits, rng: &mut R) -> Bits {
            let cut = rng.random_range(0..self.n);
            let bits = p1.bits[..cut].iter().chain(&p2.bits[cut..]).copied().collect();
            Bits {
                bits,
                cost: f64::INFINITY,
            }
        }

        fn mutate<R: Rng>(&self, ind: &mut Bits, rng: &mut R) {
            let i = rng.random_range(0..self.n);
            ind.bits[i] = !ind.bits[i];
        }
    }

    #[test]
    fn test_onemax_improves() {
        let problem = OneMax { n: 24 };
        let config = GaConfig::default()
            .with_population_size(40)
            .with_max_generations(150)
            .with_elite_count(2)
            .with_mutation_rate(0.3)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).expect("valid config");
        assert!(result.best_cost <= 2.0, "got {}", result.best_cost);
        assert_eq!(result.generations, 150);
        assert_eq!(result.cost_history.len(), 151);
    }

    #[test]
    fn test_elites_make_history_monotone() {
        let problem = OneMax { n: 16 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(40)
            .with_elite_count(1)
            .with_selection(Selection::Roulette)
            .with_seed(5);

        let result = GaRunner::run(&problem, &config).expect("valid config");
        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let problem = OneMax { n: 16 };
        let config = GaConfig::default().with_max_generations(20).with_seed(9);
        let a = GaRunner::run(&problem, &config).expect("valid config");
        let b = GaRunner::run(&problem, &config).expect("valid config");
        assert_eq!(a.best.bits, b.best.bits);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_parallel_evaluation_matches_serial() {
        let problem = OneMax { n: 16 };
        let config = GaConfig::default().with_max_generations(10).with_seed(4);
        let serial = GaRunner::run(&problem, &config).expect("valid config");
        let parallel =
            GaRunner::run(&problem, &config.clone().with_parallel(true)).expect("valid config");
        assert_eq!(serial.cost_history, parallel.cost_history);
    }

    #[test]
    fn test_cancelled_run_returns_initial_best() {
        let problem = OneMax { n: 16 };
        let stop = Termination::none().with_cancel(Arc::new(AtomicBool::new(true)));
        let result = GaRunner::run_with_cancel(&problem, &GaConfig::default().with_seed(1), &stop)
            .expect("valid config");
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.cost_history.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let problem = OneMax { n: 8 };
        assert!(GaRunner::run(&problem, &GaConfig::default().with_population_size(0)).is_err());
    }
}
