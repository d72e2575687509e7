//! 2-opt segment reversal.
//!
//! For each pair of positions `1 <= i < j < n`, reversing `route[i..=j]`
//! replaces edges `(i-1, i)` and `(j, j+1)` with `(i-1, j)` and `(i, j+1)`.
//! When `j` is the last position there is no `(j, j+1)` edge, so only the
//! first pair of edges is compared. Moves are applied as soon as they are
//! found (first improvement) and sweeps repeat until one finds nothing.

use super::{LocalSearchResult, IMPROVEMENT_EPSILON};
use crate::instance::ProblemInstance;
use crate::route::open_path_cost;
use crate::termination::Termination;

/// Improves `route` with 2-opt until convergence or `max_passes` sweeps.
///
/// # Examples
///
/// ```
/// use u_tour::instance::ProblemInstance;
/// use u_tour::local_search::two_opt_improve;
/// use u_tour::termination::Termination;
///
/// // Four points on a line: 0 - 1 - 2 - 3, visited as 0, 2, 1, 3.
/// let pos = [0.0f64, 1.0, 2.0, 3.0];
/// let m: Vec<Vec<f64>> = pos
///     .iter()
///     .map(|a| pos.iter().map(|b| (a - b).abs()).collect())
///     .collect();
/// let instance = ProblemInstance::new(m, 0).unwrap();
///
/// let result = two_opt_improve(&[0, 2, 1, 3], &instance, 100, &Termination::none());
/// assert_eq!(result.route, vec![0, 1, 2, 3]);
/// assert!((result.cost - 3.0).abs() < 1e-12);
/// ```
pub fn two_opt_improve(
    route: &[usize],
    instance: &ProblemInstance,
    max_passes: usize,
    termination: &Termination,
) -> LocalSearchResult {
    let mut current = route.to_vec();
    let n = current.len();

    let mut passes = 0;
    let mut improvements = 0;
    let mut converged = false;
    let mut cancelled = false;

    while passes < max_passes {
        if termination.should_stop() {
            cancelled = true;
            break;
        }
        passes += 1;

        let mut improved = false;
        for i in 1..n.saturating_sub(1) {
            for j in i + 1..n {
                let delta = reversal_delta(&current, instance, i, j);
                if delta < -IMPROVEMENT_EPSILON {
                    current[i..=j].reverse();
                    improvements += 1;
                    improved = true;
                }
            }
        }

        if !improved {
            converged = true;
            break;
        }
    }

    // A run with nothing to sweep is trivially converged.
    if n < 3 {
        converged = true;
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

/// Open-path cost change from reversing `route[i..=j]`.
fn reversal_delta(route: &[usize], instance: &ProblemInstance, i: usize, j: usize) -> f64 {
    let before = route[i - 1];
    let mut old = instance.distance(before, route[i]);
    let mut new = instance.distance(before, route[j]);

    if let Some(&after) = route.get(j + 1) {
        old += instance.distance(route[j], after);
        new += instance.distance(route[i], after);
    }

    new - old
}
