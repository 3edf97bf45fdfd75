//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_risk_analyzer::prelude::*;
//! ```

// Analysis
pub use crate::analysis::PositionAnalyzer;

// Reports
pub use crate::report::{ReportSummary, YieldReport};

// Decisions
pub use crate::opportunity::{
    RankedOpportunity, ReallocationCheck, ReallocationConfig, check_reallocation,
    rank_opportunities,
};
