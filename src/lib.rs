//! Hybrid delivery-route optimizer.
//!
//! Given a distance matrix and a start node, the crate searches for a
//! visiting order with minimal **open-path** cost (no return edge) by
//! running an ensemble of algorithms and keeping the cheapest route:
//!
//! - **Nearest neighbor**: greedy baseline, total over every valid instance.
//! - **2-opt / 3-opt**: deterministic segment-reversal and reconnection
//!   local search.
//! - **Simulated Annealing (SA)**: random 2-opt moves under a cooling
//!   schedule.
//! - **Genetic Algorithm (GA)**: generational search with fixed-start
//!   order crossover and swap mutation.
//! - **Ant Colony Optimization (ACO)**: Ant System with pheromone
//!   evaporation and deposit.
//! - **Candidate generator**: ranked bit patterns from a pluggable
//!   weighted sampler, decoded into routes three ways.
//!
//! # Example
//!
//! ```
//! use u_tour::ensemble::{Ensemble, EnsembleConfig};
//! use u_tour::geo::haversine_km;
//! use u_tour::instance::ProblemInstance;
//!
//! let stops = [
//!     (37.5665, 126.9780),
//!     (37.5172, 127.0473),
//!     (37.5796, 126.9770),
//!     (37.4979, 127.0276),
//!     (37.5547, 126.9707),
//! ];
//! let instance = ProblemInstance::from_coordinates(&stops, 0, haversine_km).unwrap();
//!
//! let report = Ensemble::new(EnsembleConfig::fast().with_seed(1)).unwrap().optimize(&instance);
//! assert_eq!(report.route()[0], 0);
//! assert_eq!(report.route().len(), 5);
//! ```
//!
//! # Architecture
//!
//! The search algorithms follow the `u-metaheur` layout: each family has
//! a builder-style config with `validate()`, a unit-struct runner with
//! `run` / `run_with_cancel`, and, where it is generic, a problem trait.
//! [`sa`] and [`ga`] stay domain-agnostic and plug routes in through
//! [`sa::TourAnnealing`] and [`ga::TourGa`]. The [`ensemble`] module owns
//! scheduling, failure absorption and winner selection.

pub mod aco;
pub mod candidate;
pub mod ensemble;
pub mod error;
pub mod ga;
pub mod geo;
pub mod instance;
pub mod local_search;
pub mod random;
pub mod route;
pub mod sa;
pub mod termination;

pub use ensemble::{optimize, Ensemble, EnsembleConfig, EnsembleReport};
pub use error::{TourError, TourResult};
pub use instance::ProblemInstance;
