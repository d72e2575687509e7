//! SA execution loop.

use super::config::{CoolingSchedule, SaConfig};
use super::types::SaProblem;
use crate::random::rng_from;
use crate::termination::Termination;
use rand::Rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of moves evaluated.
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Accepted moves, improving ones included.
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Whether the run was stopped by its termination condition.
    pub cancelled: bool,

    /// Best cost sampled every 100 moves, plus the final value.
    pub cost_history: Vec<f64>,
}

/// Executes Simulated Annealing.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA to completion.
    pub fn run<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>, String> {
        Self::run_with_cancel(problem, config, &Termination::none())
    }

    /// Runs SA, stopping early when `termination` fires.
    ///
    /// The config's own `time_limit_ms` is applied on top of `termination`.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        termination: &Termination,
    ) -> Result<SaResult<P::Solution>, String> {
        config.validate()?;
        let termination = termination.clone().with_time_limit_ms(config.time_limit_ms);
        let mut rng = rng_from(config.seed);

        let mut current = problem.initial_solution(&mut rng);
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        let linear_steps = linear_step_count(config);
        let mut step = 0usize;

        const HISTORY_INTERVAL: usize = 100;
        let mut cost_history = vec![best_cost];

        'outer: while temperature >= config.min_temperature {
            if termination.should_stop() {
                cancelled = true;
                break;
            }

            for _ in 0..config.iterations_per_temperature {
                if config.max_iterations > 0 && iterations >= config.max_iterations {
                    break 'outer;
                }

                let candidate = problem.neighbor(&current, &mut rng);
                let candidate_cost = problem.cost(&candidate);
                let delta = candidate_cost - current_cost;

                // Metropolis criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
                };

                if accept {
                    current = candidate;
                    current_cost = candidate_cost;
                    accepted_moves += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }

                iterations += 1;
                if iterations % HISTORY_INTERVAL == 0 {
                    cost_history.push(best_cost);
                }
            }

            temperature = cool(temperature, config, step, linear_steps);
            step += 1;
        }

        if cost_history.last().is_none_or(|&last| last != best_cost) {
            cost_history.push(best_cost);
        }

        Ok(SaResult {
            best,
            best_cost,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}

/// Next temperature under the configured schedule.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,
        CoolingSchedule::Linear => {
            let span = config.initial_temperature - config.min_temperature;
            let t = config.initial_temperature - (step + 1) as f64 * span / linear_steps as f64;
            // Step past the floor on the last step so the loop ends.
            if step + 1 >= linear_steps {
                config.min_temperature * 0.5
            } else {
                t
            }
        }
    }
}

fn linear_step_count(config: &SaConfig) -> usize {
    if config.max_iterations > 0 {
        (config.max_iterations / config.iterations_per_temperature).max(1)
    } else {
        1000
    }
}
