//! Subproblem instance: binds a node set to the heuristic and the cache.

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};

use super::{Heuristic, SolverContext};
use crate::error::{Result, TourError};
use crate::local_search::SearchMode;
use crate::models::Tour;

/// One TSP subproblem over a subset of the context's nodes.
///
/// Keeps the order the nodes were handed in (`initial_path`) as a fixed
/// reference, plus the current best tour (`heuristic_path`) and its cost.
/// [`optimise`](Self::optimise) consults the context's route cache before
/// running the heuristic; [`update`](Self::update) projects the initial
/// path onto a new active subset without searching.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::local_search::SearchMode;
/// use u_tour::solver::{SolverContext, TspInstance};
///
/// let ctx = SolverContext::new(
///     DistanceMatrix::from_rows(&[
///         vec![0.0, 2.0, 3.0, 2.0],
///         vec![2.0, 0.0, 2.0, 3.0],
///         vec![3.0, 2.0, 0.0, 2.0],
///         vec![2.0, 3.0, 2.0, 0.0],
///     ])
///     .unwrap(),
/// )
/// .unwrap();
///
/// let mut instance = TspInstance::new(&ctx, vec![0, 2, 1, 3], SearchMode::BestImprovement).unwrap();
/// assert!((instance.initial_cost() - 10.0).abs() < 1e-10);
///
/// let (tour, cost) = instance.optimise().unwrap();
/// assert_eq!(tour.len(), 4);
/// assert!((cost - 8.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct TspInstance<'ctx> {
    ctx: &'ctx SolverContext,
    heuristic: Heuristic,
    initial_path: Tour,
    initial_cost: f64,
    heuristic_path: Tour,
    heuristic_cost: f64,
    engine_runs: usize,
}

impl<'ctx> TspInstance<'ctx> {
    /// Creates an instance running 2-opt in `mode` with the context's budget.
    ///
    /// # Errors
    ///
    /// [`TourError::EmptyProblem`] or [`TourError::InvalidTour`] if `nodes`
    /// is not a valid tour over the context's matrix.
    pub fn new(ctx: &'ctx SolverContext, nodes: Vec<usize>, mode: SearchMode) -> Result<Self> {
        let config = ctx.config().two_opt.clone().with_mode(mode);
        Self::with_heuristic(ctx, nodes, Heuristic::TwoOpt(config))
    }

    /// Creates an instance with an explicit heuristic.
    pub fn with_heuristic(
        ctx: &'ctx SolverContext,
        nodes: Vec<usize>,
        heuristic: Heuristic,
    ) -> Result<Self> {
        let initial_path = Tour::new(nodes, ctx.matrix())?;
        let initial_cost = ctx.matrix().tour_cost(&initial_path);
        Ok(Self {
            ctx,
            heuristic,
            heuristic_path: initial_path.clone(),
            heuristic_cost: initial_cost,
            initial_path,
            initial_cost,
            engine_runs: 0,
        })
    }

    /// Returns a locally optimal tour for the current node set.
    ///
    /// On a cache hit the cached tour and cost are adopted as-is and the
    /// heuristic does not run. On a miss the heuristic runs from the current
    /// tour and the result is [`save`](Self::save)d.
    pub fn optimise(&mut self) -> Result<(Tour, f64)> {
        let key = self.heuristic_path.key();
        if let Some(hit) = self.ctx.cache().lookup(&key) {
            self.heuristic_path = hit.tour;
            self.heuristic_cost = hit.cost;
        } else {
            let outcome = self
                .heuristic
                .improve(&self.heuristic_path, self.ctx.matrix())?;
            self.engine_runs += 1;
            if !outcome.converged {
                warn!(
                    "{} stopped before a local optimum on {} nodes; caching cost {:.4}",
                    self.heuristic.name(),
                    outcome.tour.len(),
                    outcome.cost
                );
            }
            self.save(outcome.tour, outcome.cost);
        }
        Ok((self.heuristic_path.clone(), self.heuristic_cost))
    }

    /// Restricts the current tour to `subset`, in initial-path order.
    ///
    /// Nodes of `subset` that are not in the initial path are ignored. The
    /// heuristic is not run.
    ///
    /// # Errors
    ///
    /// [`TourError::EmptyProblem`] if no initial-path node is in `subset`;
    /// the instance is left unchanged.
    pub fn update(&mut self, subset: &[usize]) -> Result<()> {
        let members: HashSet<usize> = subset.iter().copied().collect();
        let projected = self.initial_path.restricted_to(&members);
        if projected.is_empty() {
            return Err(TourError::EmptyProblem);
        }
        let cost = self.ctx.matrix().path_cost(&projected)?;
        debug!(
            "projected {} initial nodes onto {} active nodes (cost {cost:.4})",
            self.initial_path.len(),
            projected.len()
        );
        self.heuristic_path = Tour::new_unchecked(projected);
        self.heuristic_cost = cost;
        Ok(())
    }

    /// Sets the current tour and cost, and writes them to the route cache.
    pub fn save(&mut self, tour: Tour, cost: f64) {
        self.ctx.cache().store(tour.key(), tour.clone(), cost);
        self.heuristic_path = tour;
        self.heuristic_cost = cost;
    }

    /// Reference ordering the instance was created with.
    pub fn initial_path(&self) -> &Tour {
        &self.initial_path
    }

    /// Cost of the initial path.
    pub fn initial_cost(&self) -> f64 {
        self.initial_cost
    }

    /// Current best tour.
    pub fn heuristic_path(&self) -> &Tour {
        &self.heuristic_path
    }

    /// Cost of the current best tour.
    pub fn heuristic_cost(&self) -> f64 {
        self.heuristic_cost
    }

    /// Heuristic run on cache misses.
    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }

    /// Acceptance strategy of the heuristic.
    pub fn mode(&self) -> SearchMode {
        self.heuristic.mode()
    }

    /// Pass-through ratio from the context configuration.
    pub fn ratio(&self) -> Option<f64> {
        self.ctx.config().ratio
    }

    /// Number of times this instance ran its heuristic.
    pub fn engine_runs(&self) -> usize {
        self.engine_runs
    }
}

impl fmt::Display for TspInstance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {:.4})", self.heuristic_path, self.heuristic_cost)
    }
}
