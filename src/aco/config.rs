//! ACO configuration.

/// Configuration for Ant Colony Optimization (Ant System).
///
/// # Examples
///
/// ```
/// use u_tour::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(30)
///     .with_max_iterations(50)
///     .with_alpha(1.0)
///     .with_beta(3.0)
///     .with_evaporation_rate(0.3)
///     .with_seed(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants per iteration `A`.
    pub num_ants: usize,

    /// Number of iterations.
    pub max_iterations: usize,

    /// Pheromone exponent (α).
    pub alpha: f64,

    /// Heuristic exponent (β) applied to `1 / distance`.
    pub beta: f64,

    /// Evaporation rate (ρ) in (0, 1].
    pub evaporation_rate: f64,

    /// Deposit constant `Q`; each ant adds `Q / cost` to its edges.
    pub deposit: f64,

    /// Uniform starting pheromone level.
    pub initial_pheromone: f64,

    /// Optional wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 20,
            max_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            deposit: 100.0,
            initial_pheromone: 0.1,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    pub fn with_deposit(mut self, q: f64) -> Self {
        self.deposit = q;
        self
    }

    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_ants == 0 {
            return Err("num_ants must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(self.alpha >= 0.0) || !(self.beta >= 0.0) {
            return Err("alpha and beta must be non-negative".into());
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate <= 1.0) {
            return Err("evaporation_rate must be in (0, 1]".into());
        }
        if !(self.deposit > 0.0) || !self.deposit.is_finite() {
            return Err("deposit must be positive and finite".into());
        }
        if !(self.initial_pheromone > 0.0) || !self.initial_pheromone.is_finite() {
            return Err("initial_pheromone must be positive and finite".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
