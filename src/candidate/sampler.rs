//! Weighted bit-pattern samplers.

use super::config::ParameterSet;
use super::pattern::BitPattern;
use crate::instance::ProblemInstance;
use crate::termination::Termination;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// What a sampler is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    /// Pattern width in bits.
    pub width: usize,
    /// Draws to take.
    pub shots: usize,
    /// Maximum number of ranked patterns to return.
    pub limit: usize,
}

/// A provider of ranked bit patterns for an instance.
///
/// Implementations may simulate a circuit, call out to a service, or use
/// a purely classical heuristic. The generator only needs distinct
/// patterns of `request.width` bits, best first, at most `request.limit`.
///
/// Long-running samplers must poll `termination` and return what they
/// have (possibly nothing) once it fires.
pub trait CandidateSampler: Send + Sync {
    fn sample(
        &self,
        instance: &ProblemInstance,
        params: &ParameterSet,
        request: &SampleRequest,
        rng: &mut StdRng,
        termination: &Termination,
    ) -> Vec<BitPattern>;
}

impl<S: CandidateSampler + ?Sized> CandidateSampler for &S {
    fn sample(
        &self,
        instance: &ProblemInstance,
        params: &ParameterSet,
        request: &SampleRequest,
        rng: &mut StdRng,
        termination: &Termination,
    ) -> Vec<BitPattern> {
        (**self).sample(instance, params, request, rng, termination)
    }
}

/// Shots drawn between termination checks.
const POLL_INTERVAL: usize = 64;

/// Pattern width for an instance of `n` nodes: `min(2n, max_qubits)`.
pub fn pattern_width(n: usize, max_qubits: usize) -> usize {
    (2 * n).min(max_qubits).clamp(1, 32)
}

/// Default sampler: independent per-bit draws scored by pairwise couplings.
///
/// Couplings exist between the first `m = min(n, width / 2)` bits:
/// `J(i, j) = sum over layers l of gamma * (l + 1) * exp(-d(i, j) / mean(d))`.
/// Every bit starts with probability `sin^2(pi / 8)` of being set and each
/// layer mixes it with angle `2 * beta / (l + 1)`. After `shots` draws a
/// pattern is ranked by `ln(count) + sum J(i, j) * s(i, j)`, where `s` is
/// `+1` when bits `i` and `j` agree and `-1` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedPairSampler;

impl WeightedPairSampler {
    /// Probability that a single bit reads 1 after all mixing layers.
    pub fn bit_probability(params: &ParameterSet) -> f64 {
        let mut p = (PI / 8.0).sin().powi(2);
        for layer in 0..params.depth {
            let theta = 2.0 * params.beta / (layer + 1) as f64;
            let (s, c) = ((theta / 2.0).sin().powi(2), (theta / 2.0).cos().powi(2));
            p = p * c + (1.0 - p) * s;
        }
        p.clamp(0.0, 1.0)
    }

    /// Coupling matrix over the first `m` nodes.
    pub fn couplings(instance: &ProblemInstance, params: &ParameterSet, m: usize) -> Vec<Vec<f64>> {
        let mean = instance.mean_distance();
        let amplification: f64 = (0..params.depth).map(|l| (l + 1) as f64).sum();
        let mut j = vec![vec![0.0; m]; m];
        for a in 0..m {
            for b in a + 1..m {
                let w = if mean > 0.0 {
                    (-instance.distance(a, b) / mean).exp()
                } else {
                    1.0
                };
                let v = params.gamma * amplification * w;
                j[a][b] = v;
                j[b][a] = v;
            }
        }
        j
    }
}

impl CandidateSampler for WeightedPairSampler {
    fn sample(
        &self,
        instance: &ProblemInstance,
        params: &ParameterSet,
        request: &SampleRequest,
        rng: &mut StdRng,
        termination: &Termination,
    ) -> Vec<BitPattern> {
        let width = request.width.clamp(1, 32);
        let m = instance.len().min(width / 2);
        let couplings = Self::couplings(instance, params, m);
        let p = Self::bit_probability(params);

        let mut counts: BTreeMap<BitPattern, usize> = BTreeMap::new();
        for shot in 0..request.shots {
            if shot % POLL_INTERVAL == 0 && termination.should_stop() {
                break;
            }
            let pattern = BitPattern::from_bits((0..width).map(|_| rng.random_bool(p)));
            *counts.entry(pattern).or_insert(0) += 1;
        }

        let mut ranked: Vec<(BitPattern, f64)> = counts
            .into_iter()
            .map(|(pattern, count)| {
                let score = (count as f64).ln() + coupling_energy(&pattern, &couplings);
                (pattern, score)
            })
            .collect();
        // Best score first; equal scores keep ascending pattern order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(request.limit);
        ranked.into_iter().map(|(pattern, _)| pattern).collect()
    }
}

fn coupling_energy(pattern: &BitPattern, couplings: &[Vec<f64>]) -> f64 {
    let m = couplings.len();
    let mut energy = 0.0;
    for a in 0..m {
        for b in a + 1..m {
            let agree = pattern.bit(a) == pattern.bit(b);
            energy += if agree { couplings[a][b] } else { -couplings[a][b] };
        }
    }
    energy
}
