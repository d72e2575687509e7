//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search that accepts worsening moves with
//! probability `exp(-delta / T)`, where the temperature `T` decreases over
//! the run. The best solution seen is tracked separately from the
//! current one, which may wander uphill.
//!
//! [`TourAnnealing`] plugs routes into the generic [`SaRunner`]: it starts
//! from a nearest-neighbor route and moves by random 2-opt reversals.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod tour;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{SaResult, SaRunner};
pub use tour::TourAnnealing;
pub use types::SaProblem;
