//! Core trait for Simulated Annealing.

use rand::Rng;

/// A problem the annealing loop can search.
///
/// The implementor supplies the start point, the cost, and the move; the
/// runner owns temperature, acceptance and cooling. Lower cost is better.
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// A small random perturbation of `solution`.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
