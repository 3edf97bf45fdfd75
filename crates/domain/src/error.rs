//! Errors raised by the yield/risk core.

use thiserror::Error;

/// Errors that abort an analysis before any simulation work is done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// The historical series is too short to estimate returns.
    #[error("insufficient historical data: {points} price point(s), at least 2 required")]
    InsufficientData {
        /// Number of points received.
        points: usize,
    },
    /// A pool snapshot field required for yield computation is absent.
    #[error("pool snapshot is missing required field `{0}`")]
    MissingSnapshotField(&'static str),
    /// The requested price range or harvest schedule is unusable.
    #[error("invalid range configuration: {0}")]
    InvalidRangeConfiguration(String),
    /// Any other input that violates a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the workspace.
pub type RiskResult<T> = Result<T, RiskError>;
