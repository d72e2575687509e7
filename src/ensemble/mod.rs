//! Ensemble coordinator.
//!
//! [`Ensemble::optimize`] fans one task out per eligible algorithm, waits
//! for all of them, and returns an [`EnsembleReport`] with the cheapest
//! route. 2-opt and 3-opt run after the candidate generator and refine its
//! routes as well as the nearest-neighbor one; the other members start at
//! once. Each member gets its own deadline (`algorithm_time_limit_ms`),
//! which is also handed to the candidate sampler. Participation is
//! size-gated by [`SizeGates`]:
//!
//! | Algorithm | Runs when |
//! |-----------|-----------|
//! | nearest neighbor, 2-opt, 3-opt, simulated annealing | always |
//! | ant colony | `n >= 4` |
//! | genetic algorithm | `n >= 5` |
//! | candidate generator | `n <= 8` |
//!
//! A member that panics, rejects its configuration, or returns a route
//! that is not a permutation starting at the start node is recorded in
//! [`EnsembleReport::skipped`] and does not abort the call. If nothing
//! survives, the report falls back to a direct nearest-neighbor route.
//!
//! Logging goes through `tracing`: one `debug` event per finished
//! member, a `warn` per absorbed failure or fallback, and one `info`
//! event per call.

mod config;
mod coordinator;
mod report;

pub use config::{EnsembleConfig, SizeGates};
pub use coordinator::{optimize, Ensemble};
pub use report::{
    select_winner, Algorithm, AlgorithmResult, EnsembleReport, FailureReason, NotRun, RunStats,
    SkippedAlgorithm,
};
