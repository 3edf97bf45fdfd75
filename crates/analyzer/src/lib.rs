//! End-to-end yield and risk analysis of a single liquidity position.
//!
//! [`PositionAnalyzer`] ties the pieces together: it settles the range plan,
//! fits the price model, optimizes the range when asked to, runs the Monte
//! Carlo simulation and summarizes it into a [`YieldReport`]. Reports can then
//! be ranked against each other or checked for reallocation profitability.

/// Position analysis pipeline.
pub mod analysis;
/// Ranking and reallocation decisions between analyzed positions.
pub mod opportunity;
/// Prelude module for convenient imports.
pub mod prelude;
/// Analysis result and its presentation summary.
pub mod report;

pub use analysis::PositionAnalyzer;
pub use opportunity::{
    RankedOpportunity, ReallocationCheck, ReallocationConfig, check_reallocation,
    rank_opportunities,
};
pub use report::{ReportSummary, YieldReport};
