use lp_risk_analyzer::YieldReport;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a portfolio position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub Uuid);

impl PositionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PositionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one analyzed position as seen by the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPosition {
    #[serde(default)]
    pub id: PositionId,
    pub name: String,
    /// Capital allocated, USD.
    pub allocation: f64,
    /// Share of the total allocation; filled in by the aggregator.
    #[serde(default)]
    pub weight: f64,
    /// Expected return over the holding period, as a fraction.
    pub expected_return: f64,
    /// Return volatility over the holding period, as a fraction.
    pub volatility: f64,
    #[serde(default)]
    pub sharpe_ratio: f64,
    /// Asset symbols the position is exposed to.
    pub assets: Vec<String>,
}

impl PortfolioPosition {
    pub fn new(
        name: impl Into<String>,
        allocation: f64,
        expected_return: f64,
        volatility: f64,
        assets: Vec<String>,
    ) -> Self {
        Self {
            id: PositionId::new(),
            name: name.into(),
            allocation,
            weight: 0.0,
            expected_return,
            volatility,
            sharpe_ratio: sharpe(expected_return, volatility),
            assets,
        }
    }

    /// Summarizes an analyzed position.
    pub fn from_report(
        name: impl Into<String>,
        report: &YieldReport,
        assets: Vec<String>,
    ) -> Self {
        Self::new(
            name,
            report.initial_value,
            report.expected_return_fraction,
            report.statistics.return_volatility_fraction(),
            assets,
        )
    }
}

pub(crate) fn sharpe(expected_return: f64, volatility: f64) -> f64 {
    if volatility > 0.0 {
        expected_return / volatility
    } else {
        0.0
    }
}
