//! Parent selection.

use super::types::Individual;
use rand::Rng;

/// Strategy for picking a parent out of the current population.
///
/// # Examples
///
/// ```
/// use u_tour::ga::Selection;
///
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Sample `k` individuals uniformly with replacement and keep the fittest.
    ///
    /// Larger `k` means stronger selection pressure.
    Tournament(usize),

    /// Fitness-proportionate selection on `1 / (cost + ε)`.
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Index of the selected parent, or `None` for an empty population.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> Option<usize> {
        if population.is_empty() {
            return None;
        }
        Some(match *self {
            Selection::Tournament(k) => tournament(population, k, rng),
            Selection::Roulette => roulette(population, rng),
        })
    }
}

fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut winner = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let challenger = rng.random_range(0..n);
        if population[challenger].fitness() > population[winner].fitness() {
            winner = challenger;
        }
    }
    winner
}

fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    let weights: Vec<f64> = population
        .iter()
        .map(|ind| {
            let f = ind.fitness();
            if f.is_finite() && f > 0.0 {
                f
            } else {
                0.0
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1
}
