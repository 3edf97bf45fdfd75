//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_risk_portfolio::prelude::*;
//! ```

pub use crate::aggregator::{PortfolioAggregator, PortfolioRisk};
pub use crate::config::PortfolioConfig;
pub use crate::correlation::{CorrelationMatrix, pearson_correlation};
pub use crate::position::{PortfolioPosition, PositionId};
