//! Tour, canonical node-set key, and the segment-reversal primitive.

use std::collections::HashSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};

/// Returns a copy of `seq` with the inclusive range `[i, j]` reversed.
///
/// This is the 2-opt move: dropping edges `(i-1, i)` and `(j, j+1)` and
/// reconnecting them as `(i-1, j)` and `(i, j+1)` is the same as reversing
/// the segment between them. The input is never modified.
///
/// # Errors
///
/// [`TourError::InvalidIndexRange`] if `i > j` or `j >= seq.len()`.
///
/// # Examples
///
/// ```
/// use u_tour::models::reverse_segment;
///
/// assert_eq!(reverse_segment(&[1, 2, 3, 4, 5], 1, 2).unwrap(), vec![1, 3, 2, 4, 5]);
/// assert_eq!(reverse_segment(&[1, 2, 3, 4, 5], 0, 3).unwrap(), vec![4, 3, 2, 1, 5]);
/// ```
pub fn reverse_segment<T: Clone>(seq: &[T], i: usize, j: usize) -> Result<Vec<T>> {
    if i > j || j >= seq.len() {
        return Err(TourError::InvalidIndexRange {
            i,
            j,
            len: seq.len(),
        });
    }
    let mut out = seq.to_vec();
    out[i..=j].reverse();
    Ok(out)
}

/// Order-independent identity of the node set a tour covers.
///
/// Two tours over the same nodes in different orders share one key, which
/// is what lets the route cache reuse work across orderings.
///
/// # Examples
///
/// ```
/// use u_tour::models::RouteKey;
///
/// assert_eq!(RouteKey::from_nodes(&[3, 1, 2]), RouteKey::from_nodes(&[2, 3, 1]));
/// assert_eq!(RouteKey::from_nodes(&[3, 1, 2]).nodes(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteKey(Vec<usize>);

impl RouteKey {
    /// Builds the canonical (sorted) key for a node sequence.
    pub fn from_nodes(nodes: &[usize]) -> Self {
        let mut sorted = nodes.to_vec();
        sorted.sort_unstable();
        Self(sorted)
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> &[usize] {
        &self.0
    }

    /// Number of nodes in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, node) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, "}}")
    }
}

/// A cyclic visiting order over a set of matrix nodes.
///
/// Every id appears once and addresses a row of the distance matrix it was
/// validated against. The last node connects back to the first. The tour
/// holds no cost; costs are computed by [`DistanceMatrix::tour_cost`] and
/// carried alongside.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::models::Tour;
///
/// let dm = DistanceMatrix::new(4);
/// let tour = Tour::new(vec![0, 2, 1, 3], &dm).unwrap();
/// assert_eq!(tour.to_string(), "0 -> 2 -> 1 -> 3 -> 0");
/// assert!(Tour::new(vec![0, 0, 1], &dm).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Validates `nodes` against `matrix` and wraps them as a tour.
    ///
    /// # Errors
    ///
    /// - [`TourError::EmptyProblem`] if `nodes` is empty.
    /// - [`TourError::InvalidTour`] if an id is outside the matrix or repeats.
    pub fn new(nodes: Vec<usize>, matrix: &DistanceMatrix) -> Result<Self> {
        if nodes.is_empty() {
            return Err(TourError::EmptyProblem);
        }
        if nodes.len() > matrix.size() {
            return Err(TourError::invalid_tour(format!(
                "{} nodes do not fit a matrix of size {}",
                nodes.len(),
                matrix.size()
            )));
        }
        let mut seen = vec![false; matrix.size()];
        for &node in &nodes {
            if !matrix.contains(node) {
                return Err(TourError::invalid_tour(format!(
                    "node {node} is outside the matrix (size {})",
                    matrix.size()
                )));
            }
            if seen[node] {
                return Err(TourError::invalid_tour(format!("node {node} appears twice")));
            }
            seen[node] = true;
        }
        Ok(Self(nodes))
    }

    /// Wraps a sequence already known to be a valid tour.
    pub(crate) fn new_unchecked(nodes: Vec<usize>) -> Self {
        Self(nodes)
    }

    /// Validates `nodes` and returns them as a tour in random order.
    pub fn shuffled<R: Rng + ?Sized>(
        mut nodes: Vec<usize>,
        matrix: &DistanceMatrix,
        rng: &mut R,
    ) -> Result<Self> {
        nodes.shuffle(rng);
        Self::new(nodes, matrix)
    }

    /// Node ids in visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.0
    }

    /// Consumes the tour, returning its node ids.
    pub fn into_nodes(self) -> Vec<usize> {
        self.0
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for tours built through [`Tour::new`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the tour visits `node`.
    pub fn contains(&self, node: usize) -> bool {
        self.0.contains(&node)
    }

    /// Canonical key of the node set this tour covers.
    pub fn key(&self) -> RouteKey {
        RouteKey::from_nodes(&self.0)
    }

    /// Returns a new tour with positions `[i, j]` reversed.
    pub fn reversed(&self, i: usize, j: usize) -> Result<Self> {
        reverse_segment(&self.0, i, j).map(Self)
    }

    /// Subsequence of this tour keeping only `members`, in tour order.
    pub fn restricted_to(&self, members: &HashSet<usize>) -> Vec<usize> {
        self.0
            .iter()
            .copied()
            .filter(|n| members.contains(n))
            .collect()
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.0 {
            write!(f, "{node} -> ")?;
        }
        match self.0.first() {
            Some(first) => write!(f, "{first}"),
            None => write!(f, "(empty)"),
        }
    }
}
