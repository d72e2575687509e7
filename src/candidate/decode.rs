//! Pattern-to-route decoders.

use super::pattern::BitPattern;
use crate::instance::ProblemInstance;
use crate::random::create_rng;
use crate::route::nearest_neighbor;
use rand::Rng;

/// Keeps every probabilistic weight strictly positive.
const WEIGHT_EPSILON: f64 = 1e-10;

/// Ways of turning a [`BitPattern`] into a full route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeStrategy {
    /// Nearest neighbor on distances nudged up or down by pattern bits.
    BiasedNearestNeighbor,
    /// Samples each next node with weight `max(d) - d + ε`, seeded by the pattern.
    Probabilistic,
    /// Plain nearest neighbor; ignores the pattern.
    NearestNeighbor,
}

impl DecodeStrategy {
    pub const ALL: [DecodeStrategy; 3] = [
        DecodeStrategy::BiasedNearestNeighbor,
        DecodeStrategy::Probabilistic,
        DecodeStrategy::NearestNeighbor,
    ];

    /// Decodes `pattern` into a route starting at the instance's start node.
    ///
    /// `perturbation` is the relative nudge used by
    /// [`BiasedNearestNeighbor`](Self::BiasedNearestNeighbor).
    pub fn decode(
        &self,
        pattern: &BitPattern,
        instance: &ProblemInstance,
        perturbation: f64,
    ) -> Vec<usize> {
        match self {
            DecodeStrategy::BiasedNearestNeighbor => {
                biased_nearest_neighbor(pattern, instance, perturbation)
            }
            DecodeStrategy::Probabilistic => probabilistic(pattern, instance),
            DecodeStrategy::NearestNeighbor => nearest_neighbor(instance),
        }
    }
}

/// A set bit at `(current * n + candidate) % width` shortens the edge by
/// `perturbation * d`; a clear bit lengthens it. Ties go to the lowest index.
fn biased_nearest_neighbor(
    pattern: &BitPattern,
    instance: &ProblemInstance,
    perturbation: f64,
) -> Vec<usize> {
    let n = instance.len();
    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);

    let mut current = instance.start();
    visited[current] = true;
    route.push(current);

    while route.len() < n {
        let mut next = None;
        let mut best = f64::INFINITY;
        for cand in (0..n).filter(|&v| !visited[v]) {
            let d = instance.distance(current, cand);
            let sign = if pattern.bit(current * n + cand) { -1.0 } else { 1.0 };
            let perturbed = d + sign * perturbation * d;
            if next.is_none() || perturbed < best {
                best = perturbed;
                next = Some(cand);
            }
        }
        let Some(next) = next else { break };
        visited[next] = true;
        route.push(next);
        current = next;
    }

    route
}

fn probabilistic(pattern: &BitPattern, instance: &ProblemInstance) -> Vec<usize> {
    let n = instance.len();
    let mut rng = create_rng(u64::from(pattern.value()) % 10_000);
    let mut remaining: Vec<usize> = (0..n).filter(|&v| v != instance.start()).collect();
    let mut route = Vec::with_capacity(n);

    let mut current = instance.start();
    route.push(current);

    while !remaining.is_empty() {
        let distances: Vec<f64> = remaining
            .iter()
            .map(|&v| instance.distance(current, v))
            .collect();
        let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = distances.iter().map(|d| max - d + WEIGHT_EPSILON).collect();

        let total: f64 = weights.iter().sum();
        let threshold = rng.random_range(0.0..1.0) * total;
        let mut pick = remaining.len() - 1;
        let mut cumulative = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            cumulative += w;
            if cumulative > threshold {
                pick = i;
                break;
            }
        }

        current = remaining.remove(pick);
        route.push(current);
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::is_valid_route;
    use crate::route::test_support::scrambled_circle;

    #[test]
    fn test_every_strategy_yields_valid_routes() {
        let instance = scrambled_circle(8, 5);
        for value in [0u32, 1, 0xABCD, 0xFFFF, 12_345] {
            let pattern = BitPattern::new(value, 16);
            for strategy in DecodeStrategy::ALL {
                let route = strategy.decode(&pattern, &instance, 0.1);
                assert!(is_valid_route(&route, 8, 5), "{strategy:?} {pattern} -> {route:?}");
            }
        }
    }

    #[test]
    fn test_zero_perturbation_is_nearest_neighbor() {
        let instance = scrambled_circle(8, 0);
        let pattern = BitPattern::new(0b1010_1100_0101_1110, 16);
        assert_eq!(
            DecodeStrategy::BiasedNearestNeighbor.decode(&pattern, &instance, 0.0),
            nearest_neighbor(&instance)
        );
    }

    #[test]
    fn test_set_bit_pulls_a_farther_node() {
        // From 0, node 1 is at 1.0 and node 2 at 1.05.
        let m = vec![
            vec![0.0, 1.0, 1.05],
            vec![1.0, 0.0, 0.5],
            vec![1.05, 0.5, 0.0],
        ];
        let instance = ProblemInstance::new(m, 0).expect("valid");
        // Bit (0 * 3 + 2) % 6 = 2 set, bit 1 clear: 1.05 * 0.9 < 1.0 * 1.1.
        let pattern = BitPattern::from_bits([false, false, true, false, false, false]);
        assert_eq!(
            DecodeStrategy::BiasedNearestNeighbor.decode(&pattern, &instance, 0.1),
            vec![0, 2, 1]
        );
    }

    #[test]
    fn test_probabilistic_depends_only_on_pattern_seed() {
        let instance = scrambled_circle(8, 2);
        let a = DecodeStrategy::Probabilistic.decode(&BitPattern::new(123, 16), &instance, 0.1);
        let b = DecodeStrategy::Probabilistic.decode(&BitPattern::new(123, 16), &instance, 0.1);
        assert_eq!(a, b);
        // Values congruent modulo 10 000 share a seed.
        let c = DecodeStrategy::Probabilistic.decode(&BitPattern::new(10_123, 16), &instance, 0.1);
        assert_eq!(a, c);
    }

    #[test]
    fn test_single_node() {
        let instance = ProblemInstance::new(vec![vec![0.0]], 0).expect("valid");
        for strategy in DecodeStrategy::ALL {
            assert_eq!(strategy.decode(&BitPattern::new(1, 2), &instance, 0.1), vec![0]);
        }
    }
}
