//! Orchestration: context, heuristic selection and cached subproblem solves.
//!
//! - [`SolverContext`] — matrix, route cache and configuration for one problem
//! - [`Heuristic`] — improvement method chosen per instance
//! - [`TspInstance`] — a node subset with cache-aware `optimise` and `update`

mod context;
mod heuristic;
mod instance;

pub use context::{SolverConfig, SolverContext};
pub use heuristic::Heuristic;
pub use instance::TspInstance;
