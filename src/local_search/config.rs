//! 2-opt search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Move-acceptance strategy for one scan of the 2-opt neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Apply the first improving move found in a scan ("fast" mode).
    FirstImprovement,
    /// Scan every candidate and apply the most improving one ("exhaustive" mode).
    #[default]
    BestImprovement,
}

impl SearchMode {
    /// Maps a `fast` flag to a mode: `true` is first-improvement.
    pub fn from_fast(fast: bool) -> Self {
        if fast {
            Self::FirstImprovement
        } else {
            Self::BestImprovement
        }
    }

    /// Short label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstImprovement => "first-improvement",
            Self::BestImprovement => "best-improvement",
        }
    }
}

/// Configuration parameters for the 2-opt engine.
///
/// With the defaults the search runs until no improving move is left.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::local_search::{SearchMode, TwoOptConfig};
///
/// let config = TwoOptConfig::default()
///     .with_mode(SearchMode::FirstImprovement)
///     .with_max_iterations(10_000)
///     .with_time_limit(Duration::from_millis(250));
/// assert_eq!(config.max_iterations, Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOptConfig {
    /// Acceptance strategy.
    pub mode: SearchMode,
    /// Maximum number of accepted moves (None for no cap).
    pub max_iterations: Option<usize>,
    /// Wall-clock budget, checked once per scan (None for no limit).
    pub time_limit: Option<Duration>,
    /// A move is accepted only if it lowers the cost by more than this.
    /// Negative or NaN values act as 0.
    pub min_improvement: f64,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::BestImprovement,
            max_iterations: None,
            time_limit: None,
            min_improvement: 0.0,
        }
    }
}

impl TwoOptConfig {
    /// Sets the acceptance strategy.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Caps the number of accepted moves.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the minimum cost decrease for a move to count as improving.
    ///
    /// Negative values are clamped to 0 so equal-cost moves are never taken.
    pub fn with_min_improvement(mut self, eps: f64) -> Self {
        self.min_improvement = eps.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TwoOptConfig::default();
        assert_eq!(config.mode, SearchMode::BestImprovement);
        assert_eq!(config.max_iterations, None);
        assert_eq!(config.time_limit, None);
        assert_eq!(config.min_improvement, 0.0);
    }

    #[test]
    fn test_from_fast() {
        assert_eq!(SearchMode::from_fast(true), SearchMode::FirstImprovement);
        assert_eq!(SearchMode::from_fast(false), SearchMode::BestImprovement);
    }

    #[test]
    fn test_min_improvement_clamped() {
        let config = TwoOptConfig::default().with_min_improvement(-1.0);
        assert_eq!(config.min_improvement, 0.0);
    }

    #[test]
    fn test_partial_json() {
        let config: TwoOptConfig =
            serde_json::from_str(r#"{"mode": "first_improvement", "max_iterations": 50}"#)
                .expect("valid json");
        assert_eq!(config.mode, SearchMode::FirstImprovement);
        assert_eq!(config.max_iterations, Some(50));
        assert_eq!(config.time_limit, None);
    }

    #[test]
    fn test_time_limit_json() {
        let config: TwoOptConfig =
            serde_json::from_str(r#"{"time_limit": {"secs": 2, "nanos": 0}}"#).expect("valid json");
        assert_eq!(config.time_limit, Some(Duration::from_secs(2)));
        assert_eq!(config.mode, SearchMode::BestImprovement);
    }
}
