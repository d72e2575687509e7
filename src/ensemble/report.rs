//! Typed ensemble results.

use crate::route::CostedRoute;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The closed set of ensemble members.
///
/// Declaration order is the tie-break priority: on equal cost the
/// earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    NearestNeighbor,
    TwoOpt,
    ThreeOpt,
    SimulatedAnnealing,
    GeneticAlgorithm,
    AntColony,
    QuantumInspiredCandidate,
}

impl Algorithm {
    /// All members in priority order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::NearestNeighbor,
        Algorithm::TwoOpt,
        Algorithm::ThreeOpt,
        Algorithm::SimulatedAnnealing,
        Algorithm::GeneticAlgorithm,
        Algorithm::AntColony,
        Algorithm::QuantumInspiredCandidate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::NearestNeighbor => "nearest_neighbor",
            Algorithm::TwoOpt => "two_opt",
            Algorithm::ThreeOpt => "three_opt",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::GeneticAlgorithm => "genetic_algorithm",
            Algorithm::AntColony => "ant_colony",
            Algorithm::QuantumInspiredCandidate => "quantum_inspired_candidate",
        }
    }

    /// Stream index for seed derivation.
    pub(crate) fn stream(&self) -> u64 {
        *self as u64
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How long an algorithm ran and how far it got.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub elapsed: Duration,
    /// Passes, moves, generations or iterations, depending on the algorithm.
    pub iterations: usize,
    /// `true` when a cancel flag or deadline cut the run short.
    pub cancelled: bool,
}

/// One successfully completed ensemble member.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,
    pub route: CostedRoute,
    pub stats: RunStats,
}

impl AlgorithmResult {
    pub fn cost(&self) -> f64 {
        self.route.cost
    }
}

/// Why an eligible algorithm produced no result.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    #[error("panicked: {0}")]
    Panicked(String),

    #[error("returned a route that is not a permutation starting at the start node")]
    InvalidRoute,

    #[error("returned a non-finite cost")]
    NonFiniteCost,

    #[error("rejected its configuration: {0}")]
    InvalidConfig(String),
}

/// Why an algorithm is absent from the results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotRun {
    /// Excluded by [`SizeGates`](super::SizeGates).
    SizeGated,
    /// Ran and failed; the failure was absorbed.
    Failed(FailureReason),
}

/// An algorithm that did not contribute a result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedAlgorithm {
    pub algorithm: Algorithm,
    pub reason: NotRun,
}

/// Output of one [`optimize`](super::Ensemble::optimize) call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleReport {
    /// Completed members in priority order.
    pub results: Vec<AlgorithmResult>,

    /// Members that were gated out or failed.
    pub skipped: Vec<SkippedAlgorithm>,

    /// The cheapest result, ties broken by priority.
    pub winner: AlgorithmResult,

    /// `true` when every member failed and `winner` is a direct
    /// nearest-neighbor construction.
    pub fallback: bool,

    /// Wall-clock time of the whole call.
    pub elapsed: Duration,
}

impl EnsembleReport {
    pub fn route(&self) -> &[usize] {
        &self.winner.route.route
    }

    pub fn cost(&self) -> f64 {
        self.winner.cost()
    }

    pub fn winning_algorithm(&self) -> Algorithm {
        self.winner.algorithm
    }

    /// The result of `algorithm`, if it completed.
    pub fn result(&self, algorithm: Algorithm) -> Option<&AlgorithmResult> {
        self.results.iter().find(|r| r.algorithm == algorithm)
    }

    /// `(algorithm, cost)` for every completed member, in priority order.
    pub fn comparison(&self) -> Vec<(Algorithm, f64)> {
        self.results.iter().map(|r| (r.algorithm, r.cost())).collect()
    }
}

/// Lowest cost wins; equal costs go to the earlier [`Algorithm`].
pub fn select_winner(results: &[AlgorithmResult]) -> Option<&AlgorithmResult> {
    results
        .iter()
        .min_by(|a, b| a.cost().total_cmp(&b.cost()).then(a.algorithm.cmp(&b.algorithm)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(algorithm: Algorithm, cost: f64) -> AlgorithmResult {
        AlgorithmResult {
            algorithm,
            route: CostedRoute {
                route: vec![0, 1],
                cost,
            },
            stats: RunStats::default(),
        }
    }

    #[test]
    fn test_priority_order() {
        let mut sorted = Algorithm::ALL;
        sorted.sort();
        assert_eq!(sorted, Algorithm::ALL);
        assert!(Algorithm::NearestNeighbor < Algorithm::QuantumInspiredCandidate);
    }

    #[test]
    fn test_winner_lowest_cost() {
        let results = vec![
            result(Algorithm::NearestNeighbor, 10.0),
            result(Algorithm::AntColony, 7.5),
            result(Algorithm::TwoOpt, 8.0),
        ];
        assert_eq!(select_winner(&results).map(|r| r.algorithm), Some(Algorithm::AntColony));
    }

    #[test]
    fn test_winner_tie_goes_to_priority() {
        let results = vec![
            result(Algorithm::GeneticAlgorithm, 5.0),
            result(Algorithm::ThreeOpt, 5.0),
            result(Algorithm::QuantumInspiredCandidate, 5.0),
        ];
        assert_eq!(select_winner(&results).map(|r| r.algorithm), Some(Algorithm::ThreeOpt));
    }

    #[test]
    fn test_winner_of_nothing() {
        assert!(select_winner(&[]).is_none());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Algorithm::SimulatedAnnealing.to_string(), "simulated_annealing");
        assert_eq!(
            FailureReason::Panicked("boom".into()).to_string(),
            "panicked: boom"
        );
    }
}
