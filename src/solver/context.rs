//! Process-scoped solver context.

use serde::{Deserialize, Serialize};

use crate::cache::RouteCache;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::local_search::TwoOptConfig;

/// Settings shared by every instance created against one context.
///
/// # Examples
///
/// ```
/// use u_tour::solver::SolverConfig;
///
/// let config = SolverConfig::default().with_ratio(0.5);
/// assert_eq!(config.ratio, Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Caller-defined scaling/acceptance parameter. Stored and exposed for
    /// the surrounding pipeline; the search itself does not read it.
    pub ratio: Option<f64>,
    /// Budget and acceptance defaults for 2-opt runs.
    pub two_opt: TwoOptConfig,
}

impl SolverConfig {
    /// Sets the pass-through ratio.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Sets the 2-opt defaults.
    pub fn with_two_opt(mut self, two_opt: TwoOptConfig) -> Self {
        self.two_opt = two_opt;
        self
    }
}

/// Distance matrix, route cache and configuration for one problem.
///
/// Create it once per problem and hand a reference to every
/// [`TspInstance`](super::TspInstance). The matrix is read-only from then on;
/// the cache is internally synchronized, so the context is `Sync` and may be
/// shared between threads.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::solver::SolverContext;
///
/// let ctx = SolverContext::new(DistanceMatrix::new(3)).unwrap();
/// assert_eq!(ctx.matrix().size(), 3);
/// assert!(ctx.cache().is_empty());
/// ```
#[derive(Debug)]
pub struct SolverContext {
    matrix: DistanceMatrix,
    cache: RouteCache,
    config: SolverConfig,
}

impl SolverContext {
    /// Creates a context with an empty cache and default configuration.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidMatrix`](crate::error::TourError::InvalidMatrix)
    /// if the matrix holds a negative or non-finite cost or a non-zero
    /// diagonal entry.
    pub fn new(matrix: DistanceMatrix) -> Result<Self> {
        matrix.validate()?;
        Ok(Self {
            matrix,
            cache: RouteCache::new(),
            config: SolverConfig::default(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// The shared route cache.
    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// The configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TourError;
    use crate::local_search::SearchMode;

    #[test]
    fn test_config_from_json() {
        let config: SolverConfig = serde_json::from_str(
            r#"{"ratio": 0.25, "two_opt": {"mode": "first_improvement", "max_iterations": 100}}"#,
        )
        .expect("valid json");
        assert_eq!(config.ratio, Some(0.25));
        assert_eq!(config.two_opt.mode, SearchMode::FirstImprovement);
        assert_eq!(config.two_opt.max_iterations, Some(100));
    }

    #[test]
    fn test_config_empty_json_is_default() {
        let config: SolverConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_context_is_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<SolverContext>();
    }

    #[test]
    fn test_rejects_unvalidated_matrix() {
        let mut diagonal = DistanceMatrix::new(3);
        diagonal.set(1, 1, 5.0);
        assert!(matches!(
            SolverContext::new(diagonal),
            Err(TourError::InvalidMatrix(_))
        ));

        let mut negative = DistanceMatrix::new(3);
        negative.set(0, 2, -4.0);
        assert!(matches!(
            SolverContext::new(negative),
            Err(TourError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_with_config() {
        let ctx = SolverContext::new(DistanceMatrix::new(2))
            .expect("valid")
            .with_config(SolverConfig::default().with_ratio(1.5));
        assert_eq!(ctx.config().ratio, Some(1.5));
    }
}
