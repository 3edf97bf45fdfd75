//! Portfolio-level risk aggregation over independently analyzed positions.
//!
//! Positions arrive as [`PortfolioPosition`] summaries. The aggregator weights
//! them by allocation, correlates their volatile assets from historical log
//! returns and reports parametric VaR, CVaR and risk-adjusted ratios.

/// Position weighting and portfolio risk.
pub mod aggregator;
/// Aggregation settings.
pub mod config;
/// Asset correlation estimates.
pub mod correlation;
/// Portfolio position summaries.
pub mod position;
/// Prelude module for convenient imports.
pub mod prelude;

pub use aggregator::{PortfolioAggregator, PortfolioRisk};
pub use config::PortfolioConfig;
pub use correlation::{CorrelationMatrix, pearson_correlation};
pub use position::{PortfolioPosition, PositionId};
