//! Dense distance matrix.

use crate::error::{Result, TourError};
use crate::models::Tour;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per problem by the caller and then shared read-only by every
/// tour and search run. Distance-to-self is 0 and every entry is a finite,
/// non-negative cost: [`from_data`](Self::from_data) and
/// [`from_rows`](Self::from_rows) check this on construction, and
/// [`SolverContext::new`](crate::solver::SolverContext::new) re-checks
/// matrices assembled with [`set`](Self::set).
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 2.0, 3.0, 2.0],
///     vec![2.0, 0.0, 2.0, 3.0],
///     vec![3.0, 2.0, 0.0, 2.0],
///     vec![2.0, 3.0, 2.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 4);
/// // The closing edge 3 -> 0 is part of the cost.
/// assert!((dm.path_cost(&[0, 1, 2, 3]).unwrap() - 8.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn new(size: usize) -> Self {
        let cells = size
            .checked_mul(size)
            .unwrap_or_else(|| panic!("a {size}x{size} matrix overflows usize"));
        Self {
            data: vec![0.0; cells],
            size,
        }
    }

    fn cell_count(size: usize) -> Result<usize> {
        size.checked_mul(size).ok_or_else(|| {
            TourError::invalid_matrix(format!("a {size}x{size} matrix overflows usize"))
        })
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// Fails if the data length doesn't match `size * size`, if any entry is
    /// negative or not finite, or if a diagonal entry is non-zero.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        let cells = Self::cell_count(size)?;
        if data.len() != cells {
            return Err(TourError::invalid_matrix(format!(
                "expected {cells} entries for a {size}x{size} matrix, got {}",
                data.len()
            )));
        }
        let dm = Self { data, size };
        dm.validate()?;
        Ok(dm)
    }

    /// Creates a distance matrix from one `Vec` per row.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(Self::cell_count(size)?);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(TourError::invalid_matrix(format!(
                    "row {r} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(size, data)
    }

    /// Checks that every entry is a finite, non-negative cost and that the
    /// diagonal is 0.
    pub fn validate(&self) -> Result<()> {
        for i in 0..self.size {
            for j in 0..self.size {
                let d = self.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(TourError::invalid_matrix(format!(
                        "entry ({i}, {j}) = {d} is not a finite non-negative cost"
                    )));
                }
            }
            if self.get(i, i) != 0.0 {
                return Err(TourError::invalid_matrix(format!(
                    "distance from {i} to itself must be 0"
                )));
            }
        }
        Ok(())
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    ///
    /// The value is not checked here; run [`validate`](Self::validate) (or
    /// hand the matrix to a `SolverContext`) once the matrix is filled.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `node` addresses a row of this matrix.
    pub fn contains(&self, node: usize) -> bool {
        node < self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Cost of the closed cycle `nodes[0] → ... → nodes[n-1] → nodes[0]`.
    ///
    /// A single node costs `get(x, x)`, which is 0. An empty sequence has no
    /// defined cost and is rejected.
    pub fn path_cost(&self, nodes: &[usize]) -> Result<f64> {
        if nodes.is_empty() {
            return Err(TourError::EmptyProblem);
        }
        if let Some(&bad) = nodes.iter().find(|&&n| !self.contains(n)) {
            return Err(TourError::invalid_tour(format!(
                "node {bad} is outside the {}x{} matrix",
                self.size, self.size
            )));
        }
        Ok(self.cycle_cost(nodes))
    }

    /// Cost of an already validated tour.
    pub fn tour_cost(&self, tour: &Tour) -> f64 {
        self.cycle_cost(tour.nodes())
    }

    fn cycle_cost(&self, nodes: &[usize]) -> f64 {
        let mut dist = 0.0;
        for w in nodes.windows(2) {
            dist += self.get(w[0], w[1]);
        }
        if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
            dist += self.get(last, first);
        }
        dist
    }
}
