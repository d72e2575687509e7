//! Ant Colony Optimization (Ant System).
//!
//! Every iteration, `num_ants` ants walk from the start node and pick each
//! next node with probability proportional to
//! `pheromone^alpha * (1 / distance)^beta`. Afterwards all pheromone
//! evaporates by `rho` and each ant deposits `Q / cost` on the edges it used.
//! The best route seen over the whole run is returned.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"

mod config;
mod runner;

pub use config::AcoConfig;
pub use runner::{AcoResult, AcoRunner};
