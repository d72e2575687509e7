//! 3-opt segment reconnection.
//!
//! Three cut positions `1 <= i < j < k <= n` split a route into
//! `A = route[..i]`, `B = route[i..j]`, `C = route[j..k]` and a possibly
//! empty tail `D = route[k..]`. The seven [`Reconnection`]s rebuild the
//! route as `A X Y D` from `B`, `C` and their reversals. Each sweep
//! evaluates every triple and variant and applies only the single best
//! move (best improvement).

use super::{LocalSearchResult, IMPROVEMENT_EPSILON};
use crate::instance::ProblemInstance;
use crate::route::open_path_cost;
use crate::termination::Termination;

/// Ways to reconnect the two middle segments `B` and `C`.
///
/// A prime marks a reversed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reconnection {
    /// `A B' C D`
    ReverseFirst,
    /// `A B C' D`
    ReverseSecond,
    /// `A B' C' D`
    ReverseBoth,
    /// `A C B D`
    Swap,
    /// `A C' B D`
    SwapReverseFirst,
    /// `A C B' D`
    SwapReverseSecond,
    /// `A C' B' D`
    SwapReverseBoth,
}

impl Reconnection {
    /// All seven non-trivial variants.
    pub const ALL: [Reconnection; 7] = [
        Reconnection::ReverseFirst,
        Reconnection::ReverseSecond,
        Reconnection::ReverseBoth,
        Reconnection::Swap,
        Reconnection::SwapReverseFirst,
        Reconnection::SwapReverseSecond,
        Reconnection::SwapReverseBoth,
    ];

    /// Which segment goes first, and whether each placed segment is reversed.
    ///
    /// Returns `(c_first, first_reversed, second_reversed)`.
    fn layout(self) -> (bool, bool, bool) {
        match self {
            Reconnection::ReverseFirst => (false, true, false),
            Reconnection::ReverseSecond => (false, false, true),
            Reconnection::ReverseBoth => (false, true, true),
            Reconnection::Swap => (true, false, false),
            Reconnection::SwapReverseFirst => (true, true, false),
            Reconnection::SwapReverseSecond => (true, false, true),
            Reconnection::SwapReverseBoth => (true, true, true),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Move {
    i: usize,
    j: usize,
    k: usize,
    reconnection: Reconnection,
    delta: f64,
}

/// Improves `route` with best-improvement 3-opt until convergence or
/// `max_passes` sweeps.
///
/// ```
/// use u_tour::instance::ProblemInstance;
/// use u_tour::local_search::three_opt_improve;
/// use u_tour::termination::Termination;
///
/// let pos = [0.0f64, 1.0, 2.0, 3.0, 4.0];
/// let m: Vec<Vec<f64>> = pos
///     .iter()
///     .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
///     .collect();
/// let instance = ProblemInstance::new(m, 0).unwrap();
///
/// let result = three_opt_improve(&[0, 3, 4, 1, 2], &instance, 50, &Termination::none());
/// assert!((result.cost - 4.0).abs() < 1e-12);
/// ```
pub fn three_opt_improve(
    route: &[usize],
    instance: &ProblemInstance,
    max_passes: usize,
    termination: &Termination,
) -> LocalSearchResult {
    let mut current = route.to_vec();
    let n = current.len();

    let mut passes = 0;
    let mut improvements = 0;
    let mut converged = n < 3;
    let mut cancelled = false;

    while !converged && passes < max_passes {
        if termination.should_stop() {
            cancelled = true;
            break;
        }
        passes += 1;

        match best_move(&current, instance, termination) {
            Some(mv) => {
                current = apply(&current, &mv);
                improvements += 1;
            }
            None if termination.should_stop() => {
                cancelled = true;
                break;
            }
            None => converged = true,
        }
    }

    LocalSearchResult {
        cost: open_path_cost(&current, instance),
        route: current,
        passes,
        improvements,
        converged,
        cancelled,
    }
}

/// Scans every triple and reconnection and returns the best strictly
/// improving move, if any.
fn best_move(
    route: &[usize],
    instance: &ProblemInstance,
    termination: &Termination,
) -> Option<Move> {
    let n = route.len();
    let mut best: Option<Move> = None;

    for i in 1..n - 1 {
        if termination.should_stop() {
            return None;
        }
        let a = route[i - 1];
        for j in i + 1..n {
            let (b1, b2) = (route[i], route[j - 1]);
            for k in j + 1..=n {
                let (c1, c2) = (route[j], route[k - 1]);
                let tail = route.get(k).copied();

                let join = |x: (usize, usize), y: (usize, usize)| {
                    let mut cost = instance.distance(a, x.0) + instance.distance(x.1, y.0);
                    if let Some(d) = tail {
                        cost += instance.distance(y.1, d);
                    }
                    cost
                };
                let original = join((b1, b2), (c1, c2));

                for reconnection in Reconnection::ALL {
                    let (c_first, rev_first, rev_second) = reconnection.layout();
                    let (first, second) = if c_first {
                        ((c1, c2), (b1, b2))
                    } else {
                        ((b1, b2), (c1, c2))
                    };
                    let first = if rev_first { (first.1, first.0) } else { first };
                    let second = if rev_second { (second.1, second.0) } else { second };

                    let delta = join(first, second) - original;
                    let threshold = best.map_or(-IMPROVEMENT_EPSILON, |m| m.delta);
                    if delta < threshold {
                        best = Some(Move {
                            i,
                            j,
                            k,
                            reconnection,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Builds the reconnected route for `mv`.
fn apply(route: &[usize], mv: &Move) -> Vec<usize> {
    let (c_first, rev_first, rev_second) = mv.reconnection.layout();
    let seg_b = &route[mv.i..mv.j];
    let seg_c = &route[mv.j..mv.k];
    let (first, second) = if c_first { (seg_c, seg_b) } else { (seg_b, seg_c) };

    let mut out = Vec::with_capacity(route.len());
    out.extend_from_slice(&route[..mv.i]);
    push_segment(&mut out, first, rev_first);
    push_segment(&mut out, second, rev_second);
    out.extend_from_slice(&route[mv.k..]);
    out
}

fn push_segment(out: &mut Vec<usize>, segment: &[usize], reversed: bool) {
    if reversed {
        out.extend(segment.iter().rev());
    } else {
        out.extend_from_slice(segment);
    }
}
