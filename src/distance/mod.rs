//! Distance matrices.
//!
//! Provides the dense, read-only cost matrix every tour is evaluated against.

mod matrix;

pub use matrix::DistanceMatrix;
