pub mod classify;
mod clearance;
mod coverage;
mod merge;
mod reconstruct;
mod split;

pub use clearance::{ClearanceReport, ClearanceViolation, ValidateClearance};
pub use coverage::DifferenceCoverage;
pub use merge::MergeCollinear;
pub use reconstruct::ReconstructBoundary;
pub use split::SplitArrangement;

use crate::error::{OperationError, Result};
use crate::math::DEFAULT_EPSILON;

/// How a vertex's outgoing edge lengths are judged against the clearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearancePolicy {
    /// Violation when every outgoing edge is longer than the threshold:
    /// each vertex needs at least one neighbour within reach.
    #[default]
    AllNeighborsExceed,
    /// Violation when any outgoing edge is longer than the threshold.
    AnyNeighborExceeds,
}

/// Caller-supplied tolerances and thresholds shared by all operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    /// Collinearity / parallelism tolerance, also used to snap vertices.
    pub epsilon: f64,
    /// Clearance threshold in input units.
    pub min_distance: f64,
    /// Per-vertex clearance rule.
    pub policy: ClearancePolicy,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            min_distance: 10.0,
            policy: ClearancePolicy::AllNeighborsExceed,
        }
    }
}

impl AnalysisParams {
    /// Returns default parameters with the given clearance threshold.
    #[must_use]
    pub fn with_min_distance(min_distance: f64) -> Self {
        Self {
            min_distance,
            ..Self::default()
        }
    }

    /// Checks that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidParameters` otherwise.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(OperationError::InvalidParameters(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            ))
            .into());
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(OperationError::InvalidParameters(format!(
                "min_distance must be finite and non-negative, got {}",
                self.min_distance
            ))
            .into());
        }
        Ok(())
    }
}
