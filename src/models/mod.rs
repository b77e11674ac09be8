//! Domain model types for the tour solver.
//!
//! Provides the cyclic tour, its canonical node-set key, and the segment
//! reversal every 2-opt move is built on.

mod tour;

pub use tour::{reverse_segment, RouteKey, Tour};
