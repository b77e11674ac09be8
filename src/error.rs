//! Error type shared by every fallible operation in the crate.
//!
//! All variants are caller contract violations. They are raised before any
//! state is touched, so an `Err` always leaves instances and caches as they
//! were.

use thiserror::Error;

/// Errors raised by tour construction, matrix validation and the swap
/// primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    /// The node sequence is not a valid tour (duplicates, unknown ids, wrong length).
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    /// A segment reversal was requested with `i > j` or `j >= len`.
    #[error("invalid index range [{i}, {j}] for a sequence of length {len}")]
    InvalidIndexRange {
        /// Start of the requested range.
        i: usize,
        /// End of the requested range (inclusive).
        j: usize,
        /// Length of the sequence.
        len: usize,
    },
    /// The node list is empty; an empty tour has no cost.
    #[error("empty problem: a tour needs at least one node")]
    EmptyProblem,
    /// The distance data is not a square matrix of finite, non-negative costs.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TourError>;

impl TourError {
    /// Builds a [`TourError::InvalidTour`] from a message.
    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    /// Builds a [`TourError::InvalidMatrix`] from a message.
    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix(message.into())
    }
}
