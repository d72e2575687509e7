//! Local-search configuration.

/// Pass limits for the 2-opt and 3-opt kernels.
///
/// A pass is one full neighborhood sweep. The kernels stop as soon as a
/// sweep finds no improving move, or when the pass limit is reached.
///
/// # Examples
///
/// ```
/// use u_tour::local_search::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default().with_two_opt_passes(60);
/// assert_eq!(config.two_opt_max_passes, 60);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Maximum 2-opt sweeps.
    pub two_opt_max_passes: usize,

    /// Maximum 3-opt sweeps. Each sweep is O(n^3).
    pub three_opt_max_passes: usize,

    /// Optional wall-clock limit per kernel invocation, in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            two_opt_max_passes: 100,
            three_opt_max_passes: 50,
            time_limit_ms: None,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_two_opt_passes(mut self, n: usize) -> Self {
        self.two_opt_max_passes = n;
        self
    }

    pub fn with_three_opt_passes(mut self, n: usize) -> Self {
        self.three_opt_max_passes = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.two_opt_max_passes == 0 {
            return Err("two_opt_max_passes must be at least 1".into());
        }
        if self.three_opt_max_passes == 0 {
            return Err("three_opt_max_passes must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
