//! Genetic Algorithm framework.
//!
//! A generic generational GA built on trait-based abstractions. A problem
//! implements [`GaProblem`], which specifies how to create, evaluate,
//! recombine and mutate individuals; [`GaRunner`] drives the loop.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution that carries its own cost
//! - [`GaProblem`]: Problem definition with initialization, evaluation and operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, generations, selection and rates
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final population's best individual plus per-generation history
//! - [`TourGa`]: Route encoding with fixed-start order crossover and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod tour;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use tour::{TourGa, TourIndividual};
pub use types::{GaProblem, Individual, FITNESS_EPSILON};
