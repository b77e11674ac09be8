//! 2-opt improvement of a closed tour.
//!
//! # Algorithm
//!
//! For positions `n < m` with `m >= n + 2`, let `i = t[n]`, `k = t[n+1]`,
//! `j = t[m]`, `l = t[m+1]`. Replacing edges `(i, k)` and `(j, l)` with
//! `(i, j)` and `(k, l)` changes the cost by
//!
//! ```text
//! delta = d(i, j) + d(k, l) - d(i, k) - d(j, l)
//! ```
//!
//! and is carried out by reversing positions `[n+1..=m]`. Scans repeat until
//! no move with `delta < 0` is left (a 2-opt local optimum), or until the
//! configured iteration or time budget runs out.
//!
//! Positions range over `n ∈ [0, S-3]`, `m ∈ [n+2, S-2]`, so the closing
//! edge `(t[S-1], t[0])` is never one of the removed edges. Reversing the
//! complementary segment would give the same cycle.
//!
//! # Complexity
//!
//! O(S²) delta evaluations per scan, no bound on the number of scans beyond
//! the strictly decreasing cost.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use super::{SearchMode, TwoOptConfig};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::Tour;

/// An improving 2-opt move, addressed by tour positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove {
    /// Position of the first removed edge's tail.
    pub n: usize,
    /// Position of the second removed edge's tail.
    pub m: usize,
    /// Cost change; always negative for a returned move.
    pub delta: f64,
}

/// Result of a 2-opt run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Final tour.
    pub tour: Tour,
    /// Cost of `tour`, recomputed from the matrix.
    pub cost: f64,
    /// Cost of the starting tour.
    pub initial_cost: f64,
    /// Number of accepted moves.
    pub iterations: usize,
    /// Number of move deltas evaluated.
    pub evaluations: u64,
    /// `true` if the search stopped at a local optimum rather than a budget.
    pub converged: bool,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Cost removed by the search.
    pub fn improvement(&self) -> f64 {
        self.initial_cost - self.cost
    }
}

/// Cost change of the 2-opt move at positions `(n, m)`.
///
/// # Panics
///
/// Panics if `m + 1 >= nodes.len()`.
pub fn two_opt_delta(nodes: &[usize], distances: &DistanceMatrix, n: usize, m: usize) -> f64 {
    let i = nodes[n];
    let k = nodes[n + 1];
    let j = nodes[m];
    let l = nodes[m + 1];
    distances.get(i, j) + distances.get(k, l) - distances.get(i, k) - distances.get(j, l)
}

/// Scans the 2-opt neighborhood of `nodes` once.
///
/// Only moves with `delta < threshold` count as improving; pass `0.0` for
/// strict improvement. A positive or NaN threshold is treated as `0.0`, so
/// equal-cost and worsening moves are never returned. In
/// [`SearchMode::FirstImprovement`] the first such move is returned,
/// otherwise the most negative one. The second element is the number of
/// deltas evaluated.
pub fn find_improving_move(
    nodes: &[usize],
    distances: &DistanceMatrix,
    mode: SearchMode,
    threshold: f64,
) -> (Option<TwoOptMove>, u64) {
    let size = nodes.len();
    let mut evaluations = 0u64;
    if size < 4 {
        return (None, evaluations);
    }

    let mut best_change = threshold.min(0.0);
    let mut best: Option<TwoOptMove> = None;

    for n in 0..=size - 3 {
        for m in (n + 2)..=size - 2 {
            let delta = two_opt_delta(nodes, distances, n, m);
            evaluations += 1;
            if delta < best_change {
                best_change = delta;
                best = Some(TwoOptMove { n, m, delta });
                if mode == SearchMode::FirstImprovement {
                    return (best, evaluations);
                }
            }
        }
    }

    (best, evaluations)
}

/// The 2-opt local-search engine.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::local_search::{TwoOpt, TwoOptConfig};
/// use u_tour::models::Tour;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 2.0, 3.0, 2.0],
///     vec![2.0, 0.0, 2.0, 3.0],
///     vec![3.0, 2.0, 0.0, 2.0],
///     vec![2.0, 3.0, 2.0, 0.0],
/// ])
/// .unwrap();
/// let start = Tour::new(vec![0, 2, 1, 3], &dm).unwrap();
///
/// let outcome = TwoOpt::new(TwoOptConfig::default()).run(&start, &dm).unwrap();
/// assert!((outcome.initial_cost - 10.0).abs() < 1e-10);
/// assert!((outcome.cost - 8.0).abs() < 1e-10);
/// assert!(outcome.converged);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TwoOpt {
    config: TwoOptConfig,
}

impl TwoOpt {
    /// Creates an engine with the given configuration.
    pub fn new(config: TwoOptConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &TwoOptConfig {
        &self.config
    }

    /// Improves `tour` until it is 2-opt optimal or the budget is spent.
    ///
    /// The input tour is left untouched.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidTour`] if the tour references nodes outside
    /// `distances`.
    pub fn run(&self, tour: &Tour, distances: &DistanceMatrix) -> Result<SearchOutcome> {
        if let Some(&bad) = tour.nodes().iter().find(|&&n| !distances.contains(n)) {
            return Err(TourError::invalid_tour(format!(
                "node {bad} is outside the matrix (size {})",
                distances.size()
            )));
        }

        let start = Instant::now();
        let threshold = -self.config.min_improvement.max(0.0);
        let initial_cost = distances.tour_cost(tour);

        let mut current = tour.clone();
        let mut current_cost = initial_cost;
        let mut iterations = 0usize;
        let mut evaluations = 0u64;
        let mut converged = false;

        loop {
            if self.config.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                warn!(
                    "2-opt stopped after {iterations} moves (time limit) on {} nodes",
                    current.len()
                );
                break;
            }

            let (found, scanned) =
                find_improving_move(current.nodes(), distances, self.config.mode, threshold);
            evaluations += scanned;

            let Some(mv) = found else {
                converged = true;
                break;
            };
            if self.config.max_iterations.is_some_and(|cap| iterations >= cap) {
                warn!(
                    "2-opt stopped after {iterations} moves (iteration cap) on {} nodes",
                    current.len()
                );
                break;
            }

            current = current.reversed(mv.n + 1, mv.m)?;
            current_cost += mv.delta;
            iterations += 1;
            trace!(
                "2-opt move {iterations}: reverse [{}, {}], delta {:.6}, cost {:.6}",
                mv.n + 1,
                mv.m,
                mv.delta,
                current_cost
            );
        }

        let cost = distances.tour_cost(&current);
        let elapsed = start.elapsed();
        debug!(
            "2-opt ({}) on {} nodes: {initial_cost:.4} -> {cost:.4} in {iterations} moves, {evaluations} evaluations, {elapsed:?}",
            self.config.mode.label(),
            current.len()
        );

        Ok(SearchOutcome {
            tour: current,
            cost,
            initial_cost,
            iterations,
            evaluations,
            converged,
            elapsed,
        })
    }
}
