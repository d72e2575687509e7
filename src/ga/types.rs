//! Core trait definitions for the GA.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop and a concrete solution encoding.

use rand::Rng;

/// A candidate solution carrying its own cost.
///
/// Lower cost is better. Selection operators that need a "fitness to
/// maximize" use `1 / (cost + ε)`; see [`Individual::fitness`].
pub trait Individual: Clone + Send + Sync {
    /// Cost assigned by the last evaluation.
    fn cost(&self) -> f64;

    /// Stores the evaluated cost.
    fn set_cost(&mut self, cost: f64);

    /// Fitness to maximize, `1 / (cost + ε)`.
    fn fitness(&self) -> f64 {
        1.0 / (self.cost() + FITNESS_EPSILON)
    }
}

/// Guards the fitness transform against zero-cost individuals.
pub const FITNESS_EPSILON: f64 = 1e-10;

/// Problem definition for the GA: creation, evaluation and operators.
///
/// `Send + Sync` because evaluation may run on the rayon pool.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random, valid individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Cost of an individual. Lower is better.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one child from two parents. Defaults to a clone of `parent1`.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place. Defaults to a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}
