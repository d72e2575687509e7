//! Quantum-inspired candidate generator.
//!
//! For each `(gamma, beta, depth)` parameter set a [`CandidateSampler`]
//! produces up to ten ranked bit patterns of width `min(2n, 20)`. Every
//! pattern is decoded three ways ([`DecodeStrategy`]) and the decodes that
//! satisfy the route invariant are kept, ranked by open-path cost. When
//! none survive, the identity ordering rotated to the start node is used.
//!
//! The sampler is pluggable. [`WeightedPairSampler`] is a classical
//! stand-in for a layered circuit simulation: couplings
//! `exp(-d(i, j) / mean(d))` amplified by `(layer + 1)` reward patterns
//! whose bits agree on close node pairs.

mod config;
mod decode;
mod generator;
mod pattern;
mod sampler;

pub use config::{CandidateConfig, ParameterSet, DEFAULT_PARAMETER_SETS};
pub use decode::DecodeStrategy;
pub use generator::{Candidate, CandidateGenerator, CandidateSet};
pub use pattern::BitPattern;
pub use sampler::{pattern_width, CandidateSampler, SampleRequest, WeightedPairSampler};
