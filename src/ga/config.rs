//! GA configuration.

use super::selection::Selection;

/// Configuration for the Genetic Algorithm.
///
/// The defaults follow the generational scheme: the whole population is
/// replaced every generation (`elite_count = 0`) and the run always lasts
/// `max_generations` unless cancelled.
///
/// # Examples
///
/// ```
/// use u_tour::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_max_generations(150)
///     .with_selection(Selection::Tournament(4))
///     .with_mutation_rate(0.2)
///     .with_seed(11);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals `P`.
    pub population_size: usize,

    /// Number of generations `G`.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Individuals copied unchanged into the next generation. 0 = none.
    pub elite_count: usize,

    /// Probability of recombining two parents; otherwise parent 1 is cloned.
    pub crossover_rate: f64,

    /// Probability of applying swap mutation to a child.
    pub mutation_rate: f64,

    /// Evaluate offspring on the rayon pool (`parallel` feature only).
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            max_generations: 200,
            selection: Selection::default(),
            elite_count: 0,
            crossover_rate: 1.0,
            mutation_rate: 0.1,
            parallel: false,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Shorthand for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
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
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.elite_count >= self.population_size {
            return Err("elite_count must be smaller than population_size".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate)
            || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return Err("crossover_rate and mutation_rate must be in [0, 1]".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_generational() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 60);
        assert_eq!(config.elite_count, 0);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rates_are_clamped() {
        let config = GaConfig::default()
            .with_mutation_rate(1.7)
            .with_crossover_rate(-0.5);
        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.crossover_rate, 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        assert!(GaConfig::default().with_population_size(1).validate().is_err());
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
        assert!(GaConfig::default()
            .with_population_size(10)
            .with_elite_count(10)
            .validate()
            .is_err());
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
    }
}
