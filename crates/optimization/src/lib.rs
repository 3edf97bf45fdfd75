//! Price-range and harvest-frequency optimization for concentrated positions.

/// Scoring of candidate ranges.
pub mod objective;
/// Grid search over range widths and harvest periods.
pub mod range_optimizer;

pub use objective::{
    CandidateMetrics, MaximizeExpectedReturn, ObjectiveFunction, RiskAdjustedReturn,
};
pub use range_optimizer::{
    OptimizedRange, OptimizerConfig, RangeCandidate, RangeOptimizer, select_best,
};
