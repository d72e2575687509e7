//! Candidate generator configuration.

/// One `(gamma, beta, depth)` weighting setting.
///
/// `gamma` scales the pairwise couplings, `beta` the per-bit mixing and
/// `depth` the number of layers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSet {
    pub gamma: f64,
    pub beta: f64,
    pub depth: usize,
}

impl ParameterSet {
    pub const fn new(gamma: f64, beta: f64, depth: usize) -> Self {
        Self { gamma, beta, depth }
    }
}

/// The default sweep.
pub const DEFAULT_PARAMETER_SETS: [ParameterSet; 6] = [
    ParameterSet::new(0.8, 1.2, 2),
    ParameterSet::new(1.2, 0.8, 2),
    ParameterSet::new(1.0, 1.0, 3),
    ParameterSet::new(0.6, 1.0, 2),
    ParameterSet::new(1.0, 0.6, 2),
    ParameterSet::new(0.8, 0.8, 2),
];

/// Configuration for the candidate generator.
///
/// # Examples
///
/// ```
/// use u_tour::candidate::{CandidateConfig, ParameterSet};
///
/// let config = CandidateConfig::default()
///     .with_parameter_sets(vec![ParameterSet::new(1.0, 1.0, 2)])
///     .with_shots(256)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateConfig {
    /// Weighting settings swept in order.
    pub parameter_sets: Vec<ParameterSet>,

    /// Samples drawn per parameter set.
    pub shots: usize,

    /// Ranked patterns kept per parameter set.
    pub max_patterns: usize,

    /// Pattern width cap; the width is `min(2n, max_qubits)`.
    pub max_qubits: usize,

    /// Relative distance perturbation used by the biased decoder.
    pub perturbation: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            parameter_sets: DEFAULT_PARAMETER_SETS.to_vec(),
            shots: 1024,
            max_patterns: 10,
            max_qubits: 20,
            perturbation: 0.1,
            seed: None,
        }
    }
}

impl CandidateConfig {
    pub fn with_parameter_sets(mut self, sets: Vec<ParameterSet>) -> Self {
        self.parameter_sets = sets;
        self
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_max_patterns(mut self, n: usize) -> Self {
        self.max_patterns = n;
        self
    }

    pub fn with_max_qubits(mut self, n: usize) -> Self {
        self.max_qubits = n;
        self
    }

    pub fn with_perturbation(mut self, p: f64) -> Self {
        self.perturbation = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parameter_sets.is_empty() {
            return Err("parameter_sets must not be empty".into());
        }
        for set in &self.parameter_sets {
            if !set.gamma.is_finite() || !set.beta.is_finite() {
                return Err(format!("non-finite parameter set {set:?}"));
            }
            if set.depth == 0 {
                return Err("parameter set depth must be at least 1".into());
            }
        }
        if self.shots == 0 {
            return Err("shots must be at least 1".into());
        }
        if self.max_patterns == 0 {
            return Err("max_patterns must be at least 1".into());
        }
        if self.max_qubits == 0 || self.max_qubits > 32 {
            return Err("max_qubits must be in 1..=32".into());
        }
        if !(0.0..1.0).contains(&self.perturbation) {
            return Err("perturbation must be in [0, 1)".into());
        }
        Ok(())
    }
}
