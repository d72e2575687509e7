//! Deterministic local-search kernels: 2-opt and 3-opt.
//!
//! Both kernels keep `route[0]` fixed and score moves with open-path
//! deltas: the position after the last node has no outgoing edge, so a
//! move touching the route's tail only pays for the edges it creates
//! inside the path. Running a kernel on its own output is a no-op.
//!
//! # References
//!
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"
//! - Lin (1965), "Computer Solutions of the Traveling Salesman Problem"

mod config;
mod three_opt;
mod two_opt;

pub use config::LocalSearchConfig;
pub use three_opt::{three_opt_improve, Reconnection};
pub use two_opt::two_opt_improve;

/// Moves must improve by more than this to be applied.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Outcome of one kernel invocation.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// The improved route.
    pub route: Vec<usize>,

    /// Open-path cost of `route`.
    pub cost: f64,

    /// Number of sweeps started.
    pub passes: usize,

    /// Number of moves applied.
    pub improvements: usize,

    /// `true` when the last sweep found no improving move.
    pub converged: bool,

    /// Whether the run was stopped by its [`Termination`](crate::termination::Termination).
    pub cancelled: bool,
}
