//! Parameter sweep: sample, decode, validate, rank.

use super::config::{CandidateConfig, ParameterSet};
use super::decode::DecodeStrategy;
use super::pattern::BitPattern;
use super::sampler::{pattern_width, CandidateSampler, SampleRequest, WeightedPairSampler};
use crate::instance::ProblemInstance;
use crate::random::{create_rng, derive_seed};
use crate::route::{identity_route, is_valid_route, open_path_cost};
use crate::termination::Termination;
use tracing::warn;

/// One decoded route and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub route: Vec<usize>,
    pub cost: f64,
    /// `None` for the identity fallback.
    pub pattern: Option<BitPattern>,
    pub strategy: Option<DecodeStrategy>,
    pub params: Option<ParameterSet>,
}

/// Distinct candidate routes, cheapest first. Never empty.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub candidates: Vec<Candidate>,

    /// `true` when every decode was rejected and the identity route was used.
    pub fallback: bool,

    /// Patterns returned by the sampler over the whole sweep.
    pub patterns_sampled: usize,

    /// Parameter sets fully processed.
    pub parameter_sets_run: usize,

    /// Whether the sweep was stopped by its termination condition.
    pub cancelled: bool,
}

impl CandidateSet {
    /// The cheapest candidate.
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Candidate routes, cheapest first.
    pub fn routes(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.candidates.iter().map(|c| c.route.as_slice())
    }
}

/// Produces ranked candidate routes from a [`CandidateSampler`].
///
/// # Examples
///
/// ```
/// use u_tour::candidate::{CandidateConfig, CandidateGenerator};
/// use u_tour::instance::ProblemInstance;
///
/// let pos = [0.0f64, 2.0, 1.0, 3.0];
/// let m: Vec<Vec<f64>> = pos
///     .iter()
///     .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
///     .collect();
/// let instance = ProblemInstance::new(m, 0).unwrap();
///
/// let generator = CandidateGenerator::new(CandidateConfig::default().with_seed(1));
/// let set = generator.generate(&instance).unwrap();
/// assert!(set.best().unwrap().cost <= 3.0 + 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateGenerator<S = WeightedPairSampler> {
    config: CandidateConfig,
    sampler: S,
}

impl CandidateGenerator<WeightedPairSampler> {
    pub fn new(config: CandidateConfig) -> Self {
        Self::with_sampler(config, WeightedPairSampler)
    }
}

impl<S: CandidateSampler> CandidateGenerator<S> {
    pub fn with_sampler(config: CandidateConfig, sampler: S) -> Self {
        Self { config, sampler }
    }

    pub fn config(&self) -> &CandidateConfig {
        &self.config
    }

    /// Runs the full parameter sweep.
    pub fn generate(&self, instance: &ProblemInstance) -> Result<CandidateSet, String> {
        self.generate_with_cancel(instance, &Termination::none())
    }

    /// Runs the sweep. `termination` is checked between parameter sets and
    /// handed to the sampler; a sweep cut short keeps what it decoded.
    pub fn generate_with_cancel(
        &self,
        instance: &ProblemInstance,
        termination: &Termination,
    ) -> Result<CandidateSet, String> {
        self.config.validate()?;

        let n = instance.len();
        let request = SampleRequest {
            width: pattern_width(n, self.config.max_qubits),
            shots: self.config.shots,
            limit: self.config.max_patterns,
        };
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        let mut candidates = Vec::new();
        let mut patterns_sampled = 0;
        let mut parameter_sets_run = 0;
        let mut cancelled = false;

        for (index, params) in self.config.parameter_sets.iter().enumerate() {
            if termination.should_stop() {
                cancelled = true;
                break;
            }

            let mut rng = create_rng(derive_seed(base_seed, index as u64));
            let patterns = self
                .sampler
                .sample(instance, params, &request, &mut rng, termination);
            let cut_short = termination.should_stop();
            patterns_sampled += patterns.len();

            for pattern in patterns.into_iter().take(self.config.max_patterns) {
                for strategy in DecodeStrategy::ALL {
                    let route = strategy.decode(&pattern, instance, self.config.perturbation);
                    if !is_valid_route(&route, n, instance.start()) {
                        continue;
                    }
                    let cost = open_path_cost(&route, instance);
                    if !cost.is_finite() {
                        continue;
                    }
                    candidates.push(Candidate {
                        route,
                        cost,
                        pattern: Some(pattern),
                        strategy: Some(strategy),
                        params: Some(*params),
                    });
                }
            }
            if cut_short {
                cancelled = true;
                break;
            }
            parameter_sets_run += 1;
        }

        let fallback = candidates.is_empty();
        if fallback {
            warn!(n, "no valid candidate decoded; using identity route");
            let route = identity_route(n, instance.start());
            candidates.push(Candidate {
                cost: open_path_cost(&route, instance),
                route,
                pattern: None,
                strategy: None,
                params: None,
            });
        }

        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.route.cmp(&b.route)));
        candidates.dedup_by(|a, b| a.route == b.route);

        Ok(CandidateSet {
            candidates,
            fallback,
            patterns_sampled,
            parameter_sets_run,
            cancelled,
        })
    }
}
