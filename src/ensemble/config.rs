//! Ensemble configuration and presets.

use super::report::Algorithm;
use crate::aco::AcoConfig;
use crate::candidate::CandidateConfig;
use crate::ga::GaConfig;
use crate::local_search::LocalSearchConfig;
use crate::sa::{CoolingSchedule, SaConfig};

/// Node-count thresholds for the size-gated algorithms.
///
/// Nearest neighbor, 2-opt, 3-opt and simulated annealing always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeGates {
    /// The candidate generator, and candidate-seeded local search, run only for `n <= this`.
    pub candidate_max_nodes: usize,
    /// The genetic algorithm runs only for `n >= this`.
    pub genetic_min_nodes: usize,
    /// Ant colony runs only for `n >= this`.
    pub ant_colony_min_nodes: usize,
}

impl Default for SizeGates {
    fn default() -> Self {
        Self {
            candidate_max_nodes: 8,
            genetic_min_nodes: 5,
            ant_colony_min_nodes: 4,
        }
    }
}

impl SizeGates {
    /// Whether `algorithm` takes part for an instance of `n` nodes.
    pub fn allows(&self, algorithm: Algorithm, n: usize) -> bool {
        match algorithm {
            Algorithm::NearestNeighbor
            | Algorithm::TwoOpt
            | Algorithm::ThreeOpt
            | Algorithm::SimulatedAnnealing => true,
            Algorithm::GeneticAlgorithm => n >= self.genetic_min_nodes,
            Algorithm::AntColony => n >= self.ant_colony_min_nodes,
            Algorithm::QuantumInspiredCandidate => n <= self.candidate_max_nodes,
        }
    }
}

/// Configuration for the [`Ensemble`](super::Ensemble).
///
/// Every loop in every algorithm is bounded by a field reachable from here.
///
/// # Examples
///
/// ```
/// use u_tour::ensemble::EnsembleConfig;
///
/// let config = EnsembleConfig::balanced()
///     .with_seed(42)
///     .with_workers(4)
///     .with_algorithm_time_limit_ms(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleConfig {
    pub gates: SizeGates,
    pub local_search: LocalSearchConfig,
    pub sa: SaConfig,
    pub ga: GaConfig,
    pub aco: AcoConfig,
    pub candidate: CandidateConfig,

    /// Base seed; each algorithm derives its own stream from it.
    /// A seed set on an individual algorithm config takes precedence.
    pub seed: Option<u64>,

    /// Worker threads for the `parallel` feature. 0 = rayon's default.
    pub workers: usize,

    /// Per-algorithm wall-clock deadline in milliseconds.
    pub algorithm_time_limit_ms: Option<u64>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            gates: SizeGates::default(),
            local_search: LocalSearchConfig::default(),
            sa: SaConfig::default(),
            ga: GaConfig::default(),
            aco: AcoConfig::default(),
            candidate: CandidateConfig::default(),
            seed: None,
            workers: 0,
            algorithm_time_limit_ms: None,
        }
    }
}

impl EnsembleConfig {
    pub fn with_gates(mut self, gates: SizeGates) -> Self {
        self.gates = gates;
        self
    }

    pub fn with_local_search(mut self, config: LocalSearchConfig) -> Self {
        self.local_search = config;
        self
    }

    pub fn with_sa(mut self, config: SaConfig) -> Self {
        self.sa = config;
        self
    }

    pub fn with_ga(mut self, config: GaConfig) -> Self {
        self.ga = config;
        self
    }

    pub fn with_aco(mut self, config: AcoConfig) -> Self {
        self.aco = config;
        self
    }

    pub fn with_candidate(mut self, config: CandidateConfig) -> Self {
        self.candidate = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_algorithm_time_limit_ms(mut self, ms: u64) -> Self {
        self.algorithm_time_limit_ms = Some(ms);
        self
    }

    /// Preset for low latency.
    ///
    /// - 2-opt 50 passes, 3-opt 10 passes
    /// - SA: 5 000 moves, geometric 0.99
    /// - GA: population 30, 80 generations
    /// - ACO: 10 ants, 40 iterations
    /// - 512 shots per parameter set, 2 s per algorithm
    pub fn fast() -> Self {
        Self {
            local_search: LocalSearchConfig::default()
                .with_two_opt_passes(50)
                .with_three_opt_passes(10),
            sa: SaConfig::default()
                .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
                .with_max_iterations(5_000),
            ga: GaConfig::default()
                .with_population_size(30)
                .with_max_generations(80),
            aco: AcoConfig::default().with_num_ants(10).with_max_iterations(40),
            candidate: CandidateConfig::default().with_shots(512),
            algorithm_time_limit_ms: Some(2_000),
            ..Self::default()
        }
    }

    /// Preset balancing quality and time: the defaults, 10 s per algorithm.
    pub fn balanced() -> Self {
        Self {
            algorithm_time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset for solution quality.
    ///
    /// - 3-opt 100 passes
    /// - SA: 50 000 moves, geometric 0.999
    /// - GA: population 120, 500 generations
    /// - ACO: 30 ants, 200 iterations
    /// - 30 s per algorithm
    pub fn quality() -> Self {
        Self {
            local_search: LocalSearchConfig::default().with_three_opt_passes(100),
            sa: SaConfig::default()
                .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
                .with_max_iterations(50_000),
            ga: GaConfig::default()
                .with_population_size(120)
                .with_max_generations(500),
            aco: AcoConfig::default().with_num_ants(30).with_max_iterations(200),
            algorithm_time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Selects a preset from the node count.
    ///
    /// - `n < 10` → [`quality()`](Self::quality)
    /// - `10 ≤ n < 50` → [`balanced()`](Self::balanced)
    /// - `n ≥ 50` → [`fast()`](Self::fast), since 3-opt sweeps grow as `n³`
    pub fn auto_select(n: usize) -> Self {
        if n < 10 {
            Self::quality()
        } else if n < 50 {
            Self::balanced()
        } else {
            Self::fast()
        }
    }

    /// Validates every nested configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.local_search.validate().map_err(|e| format!("local_search: {e}"))?;
        self.sa.validate().map_err(|e| format!("sa: {e}"))?;
        self.ga.validate().map_err(|e| format!("ga: {e}"))?;
        self.aco.validate().map_err(|e| format!("aco: {e}"))?;
        self.candidate.validate().map_err(|e| format!("candidate: {e}"))?;
        if self.algorithm_time_limit_ms == Some(0) {
            return Err("algorithm_time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
