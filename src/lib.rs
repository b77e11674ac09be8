//! # u-tour
//!
//! Memoized 2-opt improvement of TSP subproblems over a dense distance
//! matrix. Built to sit inside a larger routing pipeline that repeatedly
//! hands over node subsets and wants a locally optimal closed tour back,
//! reusing earlier results for node sets it has already solved.
//!
//! ## Modules
//!
//! - [`distance`] — Dense distance matrix and closed-tour cost
//! - [`models`] — Tour, canonical node-set key, segment reversal
//! - [`local_search`] — 2-opt engine with first/best-improvement modes
//! - [`cache`] — Route cache keyed by node set
//! - [`solver`] — Solver context, heuristic selection, subproblem instances
//! - [`error`] — Error type
//!
//! ## Example
//!
//! ```
//! use u_tour::{DistanceMatrix, SearchMode, SolverContext, TspInstance};
//!
//! let ctx = SolverContext::new(
//!     DistanceMatrix::from_rows(&[
//!         vec![0.0, 2.0, 3.0, 2.0],
//!         vec![2.0, 0.0, 2.0, 3.0],
//!         vec![3.0, 2.0, 0.0, 2.0],
//!         vec![2.0, 3.0, 2.0, 0.0],
//!     ])
//!     .unwrap(),
//! )
//! .unwrap();
//!
//! let mut a = TspInstance::new(&ctx, vec![0, 2, 1, 3], SearchMode::BestImprovement).unwrap();
//! let (_, cost) = a.optimise().unwrap();
//! assert!((cost - 8.0).abs() < 1e-10);
//!
//! // Same node set, different order: served from the cache.
//! let mut b = TspInstance::new(&ctx, vec![3, 2, 1, 0], SearchMode::FirstImprovement).unwrap();
//! b.optimise().unwrap();
//! assert_eq!(b.engine_runs(), 0);
//! ```

pub mod cache;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod models;
pub mod solver;

pub use cache::RouteCache;
pub use distance::DistanceMatrix;
pub use error::{Result, TourError};
pub use local_search::{SearchMode, TwoOpt, TwoOptConfig};
pub use models::{reverse_segment, RouteKey, Tour};
pub use solver::{Heuristic, SolverConfig, SolverContext, TspInstance};
