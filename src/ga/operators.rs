//! Permutation operators that keep position 0 fixed.
//!
//! Routes always start at the instance's start node, so both operators
//! treat `route[0]` as frozen and only rearrange positions `1..n`.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)

use rand::Rng;

/// Order crossover (OX) with a fixed first position.
///
/// 1. Pick a random slice `[start, end]` within `1..n`.
/// 2. Copy `parent1[start..=end]` into the child at the same positions.
/// 3. Fill the remaining free positions left to right with the nodes of
///    `parent2`, in `parent2` order, skipping nodes already placed.
///
/// `child[0]` is always `parent1[0]`.
///
/// # Panics
/// Panics if the parents differ in length or in their first node.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(parent1.first(), parent2.first(), "parents must share a start node");

    if n < 3 {
        return parent1.to_vec();
    }

    let a = rng.random_range(1..n);
    let b = rng.random_range(1..n);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    order_crossover_with_slice(parent1, parent2, start, end)
}

/// OX child for an explicit slice `[start, end]` (both inclusive, `start >= 1`).
pub(crate) fn order_crossover_with_slice(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = parent1.len();
    let mut child = vec![usize::MAX; n];
    let mut used = vec![false; n];

    child[0] = parent1[0];
    used[parent1[0]] = true;
    for pos in start..=end {
        child[pos] = parent1[pos];
        used[parent1[pos]] = true;
    }

    let mut donors = parent2.iter().copied().filter(|&v| !used[v]);
    for slot in child.iter_mut().skip(1) {
        if *slot == usize::MAX {
            if let Some(v) = donors.next() {
                *slot = v;
            }
        }
    }

    child
}

/// Exchanges two distinct non-start positions. No-op below three nodes.
pub fn swap_mutation<R: Rng>(route: &mut [usize], rng: &mut R) {
    let n = route.len();
    if n < 3 {
        return;
    }
    let i = rng.random_range(1..n);
    let mut j = rng.random_range(1..n - 1);
    if j >= i {
        j += 1;
    }
    route.swap(i, j);
}
