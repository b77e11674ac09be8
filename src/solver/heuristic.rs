//! Closed set of tour-improvement heuristics.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::local_search::{SearchMode, SearchOutcome, TwoOpt, TwoOptConfig};
use crate::models::Tour;

/// Heuristic an instance runs on a cache miss, chosen at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Heuristic {
    /// 2-opt descent.
    TwoOpt(TwoOptConfig),
}

impl Heuristic {
    /// 2-opt with default budget and the given mode.
    pub fn two_opt(mode: SearchMode) -> Self {
        Self::TwoOpt(TwoOptConfig::default().with_mode(mode))
    }

    /// Runs the heuristic from `tour`.
    pub fn improve(&self, tour: &Tour, distances: &DistanceMatrix) -> Result<SearchOutcome> {
        match self {
            Self::TwoOpt(config) => TwoOpt::new(config.clone()).run(tour, distances),
        }
    }

    /// Acceptance strategy of the heuristic.
    pub fn mode(&self) -> SearchMode {
        match self {
            Self::TwoOpt(config) => config.mode,
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoOpt(_) => "2-opt",
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::TwoOpt(TwoOptConfig::default())
    }
}
