//! Routes, the open-path cost model, and the nearest-neighbor baseline.
//!
//! A route is a plain `Vec<usize>`: a permutation of `0..n` whose first
//! entry is the instance's start node. Its cost is the **open-path** sum of
//! consecutive edges; there is no closing edge back to the start. Every
//! algorithm in the crate scores routes with [`open_path_cost`].

use crate::instance::ProblemInstance;

/// A route together with its open-path cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostedRoute {
    /// Visiting order.
    pub route: Vec<usize>,
    /// Open-path cost of `route`.
    pub cost: f64,
}

impl CostedRoute {
    /// Scores `route` against `instance`.
    pub fn new(route: Vec<usize>, instance: &ProblemInstance) -> Self {
        let cost = open_path_cost(&route, instance);
        Self { route, cost }
    }
}

/// Sum of `distance(route[k], route[k + 1])` over consecutive pairs.
///
/// Routes with fewer than two entries cost zero.
pub fn open_path_cost(route: &[usize], instance: &ProblemInstance) -> f64 {
    route
        .windows(2)
        .map(|w| instance.distance(w[0], w[1]))
        .sum()
}

/// Checks the route invariant: a permutation of `0..n` starting at `start`.
pub fn is_valid_route(route: &[usize], n: usize, start: usize) -> bool {
    if route.len() != n || route.first() != Some(&start) {
        return false;
    }
    let mut seen = vec![false; n];
    for &node in route {
        if node >= n || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

/// Rotates a cyclic ordering so that it begins at `start`.
///
/// Returns the input unchanged when `start` does not occur in it.
pub fn rotate_to_start(mut route: Vec<usize>, start: usize) -> Vec<usize> {
    if let Some(pos) = route.iter().position(|&v| v == start) {
        route.rotate_left(pos);
    }
    route
}

/// The identity ordering `0..n` rotated to begin at `start`.
pub fn identity_route(n: usize, start: usize) -> Vec<usize> {
    rotate_to_start((0..n).collect(), start)
}

/// Greedy nearest-neighbor construction from the instance's start node.
///
/// Ties go to the lowest node index. Total over every valid instance.
pub fn nearest_neighbor(instance: &ProblemInstance) -> Vec<usize> {
    nearest_neighbor_from(instance, instance.start())
}

/// Nearest-neighbor construction from an arbitrary first node.
pub fn nearest_neighbor_from(instance: &ProblemInstance, first: usize) -> Vec<usize> {
    let n = instance.len();
    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);

    let mut current = first;
    visited[current] = true;
    route.push(current);

    while route.len() < n {
        let mut next = usize::MAX;
        let mut best = f64::INFINITY;
        for (node, &done) in visited.iter().enumerate() {
            if done {
                continue;
            }
            let d = instance.distance(current, node);
            if next == usize::MAX || d < best {
                best = d;
                next = node;
            }
        }
        visited[next] = true;
        route.push(next);
        current = next;
    }

    route
}

/// Per-segment summary of a route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStatistics {
    /// Open-path cost.
    pub total_distance: f64,
    /// Mean segment length.
    pub average_segment: f64,
    /// Longest segment.
    pub longest_segment: f64,
    /// Shortest segment.
    pub shortest_segment: f64,
    /// Number of segments (`len - 1`).
    pub segment_count: usize,
}

impl RouteStatistics {
    /// Computes statistics for `route`. Routes shorter than two nodes yield all zeros.
    pub fn of(route: &[usize], instance: &ProblemInstance) -> Self {
        let segments: Vec<f64> = route
            .windows(2)
            .map(|w| instance.distance(w[0], w[1]))
            .collect();
        if segments.is_empty() {
            return Self::default();
        }

        let total: f64 = segments.iter().sum();
        Self {
            total_distance: total,
            average_segment: total / segments.len() as f64,
            longest_segment: segments.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            shortest_segment: segments.iter().copied().fold(f64::INFINITY, f64::min),
            segment_count: segments.len(),
        }
    }
}
