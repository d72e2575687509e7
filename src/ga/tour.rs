//! Route encoding for the GA.

use super::operators::{order_crossover, swap_mutation};
use super::types::{GaProblem, Individual};
use crate::instance::ProblemInstance;
use crate::random::shuffle;
use crate::route::open_path_cost;
use rand::Rng;

/// A route plus its open-path cost.
#[derive(Debug, Clone, PartialEq)]
pub struct TourIndividual {
    pub route: Vec<usize>,
    pub cost: f64,
}

impl Individual for TourIndividual {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}

/// Evolves routes over a [`ProblemInstance`].
///
/// Individuals are `[start] ++ shuffle(others)`. Recombination is
/// [`order_crossover`] and mutation is [`swap_mutation`]; both keep
/// position 0 on the start node.
///
/// # Examples
///
/// ```
/// use u_tour::ga::{GaConfig, GaRunner, TourGa};
/// use u_tour::instance::ProblemInstance;
///
/// let pos = [0.0f64, 4.0, 1.0, 3.0, 2.0];
/// let m: Vec<Vec<f64>> = pos
///     .iter()
///     .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
///     .collect();
/// let instance = ProblemInstance::new(m, 0).unwrap();
///
/// let config = GaConfig::default().with_population_size(30).with_max_generations(80).with_seed(3);
/// let result = GaRunner::run(&TourGa::new(&instance), &config).unwrap();
/// assert_eq!(result.best.route[0], 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourGa<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> TourGa<'a> {
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }
}

impl GaProblem for TourGa<'_> {
    type Individual = TourIndividual;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TourIndividual {
        let start = self.instance.start();
        let mut others: Vec<usize> = (0..self.instance.len()).filter(|&v| v != start).collect();
        shuffle(&mut others, rng);

        let mut route = Vec::with_capacity(self.instance.len());
        route.push(start);
        route.extend(others);
        TourIndividual {
            route,
            cost: f64::INFINITY,
        }
    }

    fn evaluate(&self, individual: &TourIndividual) -> f64 {
        open_path_cost(&individual.route, self.instance)
    }

    fn crossover<R: Rng>(
        &self,
        p1: &TourIndividual,
        p2: &TourIndividual,
        rng: &mut R,
    ) -> TourIndividual {
        TourIndividual {
            route: order_crossover(&p1.route, &p2.route, rng),
            cost: f64::INFINITY,
        }
    }

    fn mutate<R: Rng>(&self, individual: &mut TourIndividual, rng: &mut R) {
        swap_mutation(&mut individual.route, rng);
        individual.cost = f64::INFINITY;
    }
}
