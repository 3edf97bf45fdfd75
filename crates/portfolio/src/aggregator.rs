//! Combines weighted positions into portfolio-level risk figures.
//!
//! Variance is `sum_ij w_i w_j sigma_i sigma_j rho_ij`, where `rho_ij` is the
//! mean correlation between the two positions' volatile assets. VaR and CVaR
//! are parametric (normal) on the total investment.

use crate::config::PortfolioConfig;
use crate::correlation::CorrelationMatrix;
use crate::position::{PortfolioPosition, sharpe};
use lp_risk_domain::error::{RiskError, RiskResult};
use lp_risk_domain::math::normal::normal_pdf;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Portfolio-level risk report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRisk {
    /// Positions with weights filled in.
    pub positions: Vec<PortfolioPosition>,
    pub total_investment: f64,
    /// Weighted expected return, as a fraction.
    pub expected_return: f64,
    pub variance: f64,
    pub volatility: f64,
    /// Parametric 95% value at risk, USD.
    pub var_95: f64,
    /// Parametric 99% value at risk, USD.
    pub var_99: f64,
    /// Expected shortfall beyond the 95% VaR, USD.
    pub cvar_95: f64,
    pub sharpe_ratio: f64,
    /// `sharpe_ratio * sqrt(2)`; an approximation, not a downside-deviation measure.
    pub sortino_ratio: f64,
    /// `1 - volatility / sum(w_i * sigma_i)`.
    pub diversification_benefit: f64,
    pub correlation: CorrelationMatrix,
}

/// Aggregates analyzed positions into a [`PortfolioRisk`].
#[derive(Debug, Clone, Default)]
pub struct PortfolioAggregator {
    pub config: PortfolioConfig,
}

impl PortfolioAggregator {
    #[must_use]
    pub fn new(config: PortfolioConfig) -> Self {
        Self { config }
    }

    /// Weights `positions` by allocation, returning them with `weight` set.
    ///
    /// # Errors
    /// [`RiskError::InvalidInput`] for an empty set or a non-positive allocation.
    pub fn weigh(
        &self,
        mut positions: Vec<PortfolioPosition>,
    ) -> RiskResult<Vec<PortfolioPosition>> {
        if positions.is_empty() {
            return Err(RiskError::InvalidInput(
                "portfolio requires at least one position".to_string(),
            ));
        }
        if let Some(p) = positions
            .iter()
            .find(|p| !(p.allocation.is_finite() && p.allocation > 0.0))
        {
            return Err(RiskError::InvalidInput(format!(
                "allocation of `{}` must be positive, got {}",
                p.name, p.allocation
            )));
        }
        if let Some(p) = positions
            .iter()
            .find(|p| !(p.volatility.is_finite() && p.volatility >= 0.0))
        {
            return Err(RiskError::InvalidInput(format!(
                "volatility of `{}` must be non-negative, got {}",
                p.name, p.volatility
            )));
        }

        let total: f64 = positions.iter().map(|p| p.allocation).sum();
        for p in &mut positions {
            p.weight = p.allocation / total;
            p.sharpe_ratio = sharpe(p.expected_return, p.volatility);
        }
        Ok(positions)
    }

    /// Builds the correlation matrix over every volatile asset in `positions`.
    pub fn correlation_matrix(
        &self,
        positions: &[PortfolioPosition],
        asset_returns: &HashMap<String, Vec<f64>>,
    ) -> CorrelationMatrix {
        let assets: BTreeSet<String> = positions
            .iter()
            .flat_map(|p| self.config.volatile_assets(&p.assets))
            .collect();
        let returns: HashMap<String, Vec<f64>> = asset_returns
            .iter()
            .map(|(k, v)| (k.to_ascii_uppercase(), v.clone()))
            .collect();
        CorrelationMatrix::from_returns(
            assets.into_iter().collect(),
            &returns,
            self.config.fallback_correlation,
        )
    }

    /// Aggregates `positions` using per-asset log-return histories.
    ///
    /// # Errors
    /// See [`PortfolioAggregator::weigh`].
    pub fn aggregate(
        &self,
        positions: Vec<PortfolioPosition>,
        asset_returns: &HashMap<String, Vec<f64>>,
    ) -> RiskResult<PortfolioRisk> {
        let positions = self.weigh(positions)?;
        let correlation = self.correlation_matrix(&positions, asset_returns);
        let volatile: Vec<Vec<String>> = positions
            .iter()
            .map(|p| self.config.volatile_assets(&p.assets))
            .collect();

        let mut variance = 0.0;
        for (i, a) in positions.iter().enumerate() {
            for (j, b) in positions.iter().enumerate() {
                let rho = if i == j {
                    1.0
                } else {
                    correlation.position_correlation(&volatile[i], &volatile[j])
                };
                variance += a.weight * b.weight * a.volatility * b.volatility * rho;
            }
        }
        let volatility = variance.max(0.0).sqrt();

        let total_investment: f64 = positions.iter().map(|p| p.allocation).sum();
        let expected_return: f64 = positions.iter().map(|p| p.weight * p.expected_return).sum();
        let undiversified: f64 = positions.iter().map(|p| p.weight * p.volatility).sum();
        let diversification_benefit = if undiversified > 0.0 {
            1.0 - volatility / undiversified
        } else {
            0.0
        };

        let var_95 = total_investment * volatility * self.config.z_95;
        let var_99 = total_investment * volatility * self.config.z_99;
        let cvar_95 = total_investment * volatility * normal_pdf(self.config.z_95)
            / self.config.tail_probability;
        let sharpe_ratio = sharpe(expected_return, volatility);

        debug!(
            positions = positions.len(),
            assets = correlation.len(),
            variance,
            "Aggregated portfolio variance"
        );
        info!(
            total_investment,
            volatility, var_95, diversification_benefit, "Portfolio risk computed"
        );

        Ok(PortfolioRisk {
            positions,
            total_investment,
            expected_return,
            variance,
            volatility,
            var_95,
            var_99,
            cvar_95,
            sharpe_ratio,
            sortino_ratio: sharpe_ratio * std::f64::consts::SQRT_2,
            diversification_benefit,
            correlation,
        })
    }
}
