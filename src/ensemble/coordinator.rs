//! Fan-out / fan-in over the ensemble members.

use super::config::EnsembleConfig;
use super::report::{
    select_winner, Algorithm, AlgorithmResult, EnsembleReport, FailureReason, NotRun, RunStats,
    SkippedAlgorithm,
};
use crate::aco::{AcoConfig, AcoRunner};
use crate::candidate::{
    CandidateConfig, CandidateGenerator, CandidateSampler, WeightedPairSampler,
};
use crate::error::{TourError, TourResult};
use crate::ga::{GaConfig, GaRunner, TourGa};
use crate::instance::ProblemInstance;
use crate::local_search::{three_opt_improve, two_opt_improve, LocalSearchResult};
use crate::random::derive_seed;
use crate::route::{is_valid_route, nearest_neighbor, CostedRoute};
use crate::sa::{SaConfig, SaRunner, TourAnnealing};
use crate::termination::Termination;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// A member's raw output, before it is checked.
#[derive(Debug, Clone)]
struct Outcome {
    route: Vec<usize>,
    iterations: usize,
    cancelled: bool,
    /// Further routes worth refining; only the candidate generator has any.
    alternatives: Vec<Vec<usize>>,
}

impl Outcome {
    fn new(route: Vec<usize>, iterations: usize, cancelled: bool) -> Self {
        Self {
            route,
            iterations,
            cancelled,
            alternatives: Vec::new(),
        }
    }
}

type MemberRun = (Algorithm, Result<(Outcome, Duration), FailureReason>);

type Kernel = fn(&[usize], &ProblemInstance, usize, &Termination) -> LocalSearchResult;

/// Runs every eligible algorithm on an instance and keeps the cheapest route.
///
/// Members run on a bounded rayon pool when the `parallel` feature is on and
/// one after another otherwise. 2-opt and 3-opt start once the candidate
/// generator has finished, since they also refine its routes; every other
/// member starts immediately. Each member owns its random source and its
/// deadline, so a seeded ensemble returns the same report either way.
///
/// # Examples
///
/// ```
/// use u_tour::ensemble::{Algorithm, Ensemble, EnsembleConfig};
/// use u_tour::instance::ProblemInstance;
///
/// let matrix = vec![
///     vec![0.0, 1.0, 2.0_f64.sqrt(), 1.0],
///     vec![1.0, 0.0, 1.0, 2.0_f64.sqrt()],
///     vec![2.0_f64.sqrt(), 1.0, 0.0, 1.0],
///     vec![1.0, 2.0_f64.sqrt(), 1.0, 0.0],
/// ];
/// let instance = ProblemInstance::new(matrix, 0).unwrap();
///
/// let ensemble = Ensemble::new(EnsembleConfig::default().with_seed(7)).unwrap();
/// let report = ensemble.optimize(&instance);
/// assert!((report.cost() - 3.0).abs() < 1e-9);
/// assert_eq!(report.winning_algorithm(), Algorithm::NearestNeighbor);
/// ```
#[derive(Debug)]
pub struct Ensemble<S = WeightedPairSampler> {
    config: EnsembleConfig,
    sampler: S,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl Default for Ensemble<WeightedPairSampler> {
    fn default() -> Self {
        Self::build(EnsembleConfig::default(), WeightedPairSampler)
    }
}

impl Ensemble<WeightedPairSampler> {
    /// Validates `config` and builds the worker pool.
    pub fn new(config: EnsembleConfig) -> TourResult<Self> {
        Self::with_sampler(config, WeightedPairSampler)
    }
}

impl<S: CandidateSampler> Ensemble<S> {
    /// Same as [`Ensemble::new`] with a custom candidate sampler.
    pub fn with_sampler(config: EnsembleConfig, sampler: S) -> TourResult<Self> {
        config.validate().map_err(TourError::InvalidConfig)?;
        Ok(Self::build(config, sampler))
    }

    fn build(config: EnsembleConfig, sampler: S) -> Self {
        Self {
            #[cfg(feature = "parallel")]
            pool: build_pool(config.workers),
            config,
            sampler,
        }
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Runs the ensemble to completion.
    pub fn optimize(&self, instance: &ProblemInstance) -> EnsembleReport {
        self.run(instance, None)
    }

    /// Runs the ensemble; setting `cancel` stops every member at its next
    /// check, and each returns its best route so far.
    pub fn optimize_with_cancel(
        &self,
        instance: &ProblemInstance,
        cancel: Arc<AtomicBool>,
    ) -> EnsembleReport {
        self.run(instance, Some(cancel))
    }

    fn run(&self, instance: &ProblemInstance, cancel: Option<Arc<AtomicBool>>) -> EnsembleReport {
        let started = Instant::now();
        let n = instance.len();
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        let mut members = Vec::new();
        let mut skipped = Vec::new();
        for algorithm in Algorithm::ALL {
            if self.config.gates.allows(algorithm, n) {
                members.push(algorithm);
            } else {
                skipped.push(SkippedAlgorithm {
                    algorithm,
                    reason: NotRun::SizeGated,
                });
            }
        }

        let with_candidates = members.contains(&Algorithm::QuantumInspiredCandidate);
        let (refiners, independent): (Vec<Algorithm>, Vec<Algorithm>) = members
            .into_iter()
            .filter(|&a| a != Algorithm::QuantumInspiredCandidate)
            .partition(|&a| matches!(a, Algorithm::TwoOpt | Algorithm::ThreeOpt));

        let task = |algorithm: Algorithm, seeds: &[Vec<usize>]| -> MemberRun {
            let started = Instant::now();
            let termination = self.termination(&cancel);
            let run = guarded(|| self.member(algorithm, instance, seeds, base_seed, termination));
            (algorithm, run.map(|o| (o, started.elapsed())))
        };
        let nn = vec![nearest_neighbor(instance)];

        let (mut runs, refined) = self.in_pool(|| {
            join(
                || fan_out(&independent, |a| task(a, &nn)),
                || {
                    let mut seeds = nn.clone();
                    let mut runs = Vec::with_capacity(refiners.len() + 1);
                    if with_candidates {
                        let run = task(Algorithm::QuantumInspiredCandidate, &seeds);
                        if let Ok((ref outcome, _)) = run.1 {
                            seeds.extend(outcome.alternatives.iter().cloned());
                        }
                        runs.push(run);
                    }
                    runs.extend(fan_out(&refiners, |a| task(a, &seeds)));
                    runs
                },
            )
        });
        runs.extend(refined);

        assemble(instance, runs, skipped, started)
    }

    #[cfg(feature = "parallel")]
    fn in_pool<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self.pool {
            Some(ref pool) => pool.install(op),
            None => op(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn in_pool<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R,
    {
        op()
    }

    /// A fresh per-member termination: the shared cancel flag plus the
    /// per-algorithm deadline, counted from now.
    fn termination(&self, cancel: &Option<Arc<AtomicBool>>) -> Termination {
        let termination = match cancel {
            Some(flag) => Termination::none().with_cancel(Arc::clone(flag)),
            None => Termination::none(),
        };
        termination.with_time_limit_ms(self.config.algorithm_time_limit_ms)
    }

    fn member(
        &self,
        algorithm: Algorithm,
        instance: &ProblemInstance,
        seeds: &[Vec<usize>],
        base_seed: u64,
        termination: Termination,
    ) -> Result<Outcome, FailureReason> {
        let ls = &self.config.local_search;
        match algorithm {
            Algorithm::NearestNeighbor => Ok(Outcome::new(nearest_neighbor(instance), 1, false)),
            Algorithm::TwoOpt => Ok(local_search(
                two_opt_improve,
                seeds,
                instance,
                ls.two_opt_max_passes,
                &termination.with_time_limit_ms(ls.time_limit_ms),
            )),
            Algorithm::ThreeOpt => Ok(local_search(
                three_opt_improve,
                seeds,
                instance,
                ls.three_opt_max_passes,
                &termination.with_time_limit_ms(ls.time_limit_ms),
            )),
            Algorithm::SimulatedAnnealing => {
                let config = SaConfig {
                    seed: Some(member_seed(self.config.sa.seed, base_seed, algorithm)),
                    ..self.config.sa.clone()
                };
                let problem = TourAnnealing::new(instance);
                let result = SaRunner::run_with_cancel(&problem, &config, &termination)
                    .map_err(FailureReason::InvalidConfig)?;
                Ok(Outcome::new(result.best, result.iterations, result.cancelled))
            }
            Algorithm::GeneticAlgorithm => {
                let config = GaConfig {
                    seed: Some(member_seed(self.config.ga.seed, base_seed, algorithm)),
                    ..self.config.ga.clone()
                };
                let problem = TourGa::new(instance);
                let result = GaRunner::run_with_cancel(&problem, &config, &termination)
                    .map_err(FailureReason::InvalidConfig)?;
                Ok(Outcome::new(result.best.route, result.generations, result.cancelled))
            }
            Algorithm::AntColony => {
                let config = AcoConfig {
                    seed: Some(member_seed(self.config.aco.seed, base_seed, algorithm)),
                    ..self.config.aco.clone()
                };
                let result = AcoRunner::run_with_cancel(instance, &config, &termination)
                    .map_err(FailureReason::InvalidConfig)?;
                Ok(Outcome::new(result.best_route, result.iterations, result.cancelled))
            }
            Algorithm::QuantumInspiredCandidate => {
                let config = CandidateConfig {
                    seed: Some(member_seed(self.config.candidate.seed, base_seed, algorithm)),
                    ..self.config.candidate.clone()
                };
                let set = CandidateGenerator::with_sampler(config, &self.sampler)
                    .generate_with_cancel(instance, &termination)
                    .map_err(FailureReason::InvalidConfig)?;
                let best = set.best().ok_or(FailureReason::InvalidRoute)?;
                let mut outcome =
                    Outcome::new(best.route.clone(), set.patterns_sampled, set.cancelled);
                outcome.alternatives = set.routes().map(<[usize]>::to_vec).collect();
                Ok(outcome)
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}

#[cfg(feature = "parallel")]
fn fan_out<F>(members: &[Algorithm], task: F) -> Vec<MemberRun>
where
    F: Fn(Algorithm) -> MemberRun + Sync + Send,
{
    use rayon::prelude::*;

    members.par_iter().map(|&a| task(a)).collect()
}

#[cfg(not(feature = "parallel"))]
fn fan_out<F>(members: &[Algorithm], task: F) -> Vec<MemberRun>
where
    F: Fn(Algorithm) -> MemberRun,
{
    members.iter().map(|&a| task(a)).collect()
}

/// Runs `ensemble` with default settings.
///
/// ```
/// use u_tour::instance::ProblemInstance;
///
/// let instance = ProblemInstance::new(vec![vec![0.0, 4.0], vec![4.0, 0.0]], 1).unwrap();
/// let report = u_tour::ensemble::optimize(&instance);
/// assert_eq!(report.route(), &[1, 0]);
/// assert_eq!(report.cost(), 4.0);
/// ```
pub fn optimize(instance: &ProblemInstance) -> EnsembleReport {
    Ensemble::default().optimize(instance)
}

#[cfg(feature = "parallel")]
fn build_pool(workers: usize) -> Option<rayon::ThreadPool> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("u-tour-{i}"))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(err) => {
            warn!(%err, "worker pool unavailable, using the global rayon pool");
            None
        }
    }
}

/// An explicit per-algorithm seed wins over the derived stream.
fn member_seed(explicit: Option<u64>, base: u64, algorithm: Algorithm) -> u64 {
    explicit.unwrap_or_else(|| derive_seed(base, algorithm.stream()))
}

/// Improves every seed route and keeps the cheapest result.
fn local_search(
    kernel: Kernel,
    seeds: &[Vec<usize>],
    instance: &ProblemInstance,
    max_passes: usize,
    termination: &Termination,
) -> Outcome {
    let mut best: Option<LocalSearchResult> = None;
    let mut iterations = 0;
    let mut cancelled = false;

    for seed in seeds {
        if best.is_some() && termination.should_stop() {
            cancelled = true;
            break;
        }
        let result = kernel(seed, instance, max_passes, termination);
        iterations += result.passes;
        cancelled |= result.cancelled;
        if best.as_ref().is_none_or(|b| result.cost < b.cost) {
            best = Some(result);
        }
    }

    Outcome::new(best.map(|b| b.route).unwrap_or_default(), iterations, cancelled)
}

/// Runs `f`, turning a panic into [`FailureReason::Panicked`].
fn guarded<T, F>(f: F) -> Result<T, FailureReason>
where
    F: FnOnce() -> Result<T, FailureReason>,
{
    catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(FailureReason::Panicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Checks a member's route against the instance and scores it.
fn accept(
    algorithm: Algorithm,
    outcome: Outcome,
    elapsed: Duration,
    instance: &ProblemInstance,
) -> Result<AlgorithmResult, FailureReason> {
    if !is_valid_route(&outcome.route, instance.len(), instance.start()) {
        return Err(FailureReason::InvalidRoute);
    }
    let route = CostedRoute::new(outcome.route, instance);
    if !route.cost.is_finite() {
        return Err(FailureReason::NonFiniteCost);
    }
    Ok(AlgorithmResult {
        algorithm,
        route,
        stats: RunStats {
            elapsed,
            iterations: outcome.iterations,
            cancelled: outcome.cancelled,
        },
    })
}

/// Fan-in: validate, log, pick the winner, fall back when nothing survived.
fn assemble(
    instance: &ProblemInstance,
    runs: Vec<MemberRun>,
    mut skipped: Vec<SkippedAlgorithm>,
    started: Instant,
) -> EnsembleReport {
    let mut results = Vec::with_capacity(runs.len());
    for (algorithm, run) in runs {
        match run.and_then(|(outcome, elapsed)| accept(algorithm, outcome, elapsed, instance)) {
            Ok(result) => {
                debug!(
                    algorithm = %algorithm,
                    cost = result.cost(),
                    elapsed_ms = result.stats.elapsed.as_millis() as u64,
                    cancelled = result.stats.cancelled,
                    "algorithm finished"
                );
                results.push(result);
            }
            Err(reason) => {
                warn!(algorithm = %algorithm, %reason, "algorithm failed, excluded from report");
                skipped.push(SkippedAlgorithm {
                    algorithm,
                    reason: NotRun::Failed(reason),
                });
            }
        }
    }
    results.sort_by_key(|r| r.algorithm);
    skipped.sort_by_key(|s| s.algorithm);

    let (winner, fallback) = match select_winner(&results) {
        Some(winner) => (winner.clone(), false),
        None => {
            warn!(n = instance.len(), "every algorithm failed, falling back to nearest neighbor");
            let winner = AlgorithmResult {
                algorithm: Algorithm::NearestNeighbor,
                route: CostedRoute::new(nearest_neighbor(instance), instance),
                stats: RunStats::default(),
            };
            (winner, true)
        }
    };

    let elapsed = started.elapsed();
    info!(
        n = instance.len(),
        winner = %winner.algorithm,
        cost = winner.cost(),
        elapsed_ms = elapsed.as_millis() as u64,
        "route optimized"
    );

    EnsembleReport {
        results,
        skipped,
        winner,
        fallback,
        elapsed,
    }
}
