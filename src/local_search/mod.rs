//! Local search over closed tours.
//!
//! - [`TwoOpt`] — segment-reversal (2-opt) descent with first- or
//!   best-improvement acceptance
//! - [`TwoOptConfig`] — mode and budget for a run

mod config;
mod two_opt;

pub use config::{SearchMode, TwoOptConfig};
pub use two_opt::{find_improving_move, two_opt_delta, SearchOutcome, TwoOpt, TwoOptMove};
