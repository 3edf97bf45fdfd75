//! Comparing analyzed positions.

use crate::report::YieldReport;
use lp_risk_domain::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry of a ranking, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOpportunity {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub name: String,
    /// Expected return over return volatility; `None` when the outcome is deterministic.
    pub risk_adjusted_return: Option<f64>,
    pub expected_return_fraction: f64,
    pub annualized_apy: f64,
    pub probability_of_loss: f64,
}

/// Sort key for a report. A deterministic report sits above every risky one
/// when it gains, below when it loses.
fn ranking_key(report: &YieldReport) -> f64 {
    match report.risk_adjusted_return() {
        Some(ratio) => ratio,
        None if report.expected_return_fraction > 0.0 => f64::INFINITY,
        None if report.expected_return_fraction < 0.0 => f64::NEG_INFINITY,
        None => 0.0,
    }
}

/// Ranks named reports by risk-adjusted return, breaking ties by expected
/// return. Fully tied reports keep their input order.
pub fn rank_opportunities<'a, I>(reports: I) -> Vec<RankedOpportunity>
where
    I: IntoIterator<Item = (&'a str, &'a YieldReport)>,
{
    let mut entries: Vec<(&str, &YieldReport, f64)> = reports
        .into_iter()
        .map(|(name, report)| (name, report, ranking_key(report)))
        .collect();

    entries.sort_by(|a, b| {
        b.2.total_cmp(&a.2).then_with(|| {
            b.1.expected_return_fraction
                .total_cmp(&a.1.expected_return_fraction)
        })
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (name, report, _))| RankedOpportunity {
            rank: idx + 1,
            name: name.to_string(),
            risk_adjusted_return: report.risk_adjusted_return(),
            expected_return_fraction: report.expected_return_fraction,
            annualized_apy: report.annualized_apy,
            probability_of_loss: report.statistics.probability_of_loss,
        })
        .collect()
}

/// Configuration for reallocation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReallocationConfig {
    /// Minimum benefit, as a multiple of the switching cost.
    pub min_profit_multiplier: f64,
}

impl Default for ReallocationConfig {
    fn default() -> Self {
        Self {
            min_profit_multiplier: 2.0, // 2x switching cost
        }
    }
}

/// Result of a reallocation profitability check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReallocationCheck {
    /// Whether moving the capital is worth it.
    pub is_profitable: bool,
    /// Cost of exiting one position and entering the other, USD.
    pub switching_cost: f64,
    /// Extra expected profit of the candidate, USD.
    pub expected_benefit: f64,
    /// Benefit needed to justify the switch, USD.
    pub min_required_benefit: f64,
}

/// Decides whether moving capital from `current` to `candidate` pays for
/// itself by at least `min_profit_multiplier` times the switching cost.
///
/// # Errors
/// [`RiskError::InvalidInput`] for a negative or non-finite switching cost.
pub fn check_reallocation(
    current: &YieldReport,
    candidate: &YieldReport,
    switching_cost: f64,
    config: &ReallocationConfig,
) -> RiskResult<ReallocationCheck> {
    if !(switching_cost.is_finite() && switching_cost >= 0.0) {
        return Err(RiskError::InvalidInput(format!(
            "switching cost must be non-negative, got {switching_cost}"
        )));
    }

    let expected_benefit = candidate.expected_return - current.expected_return;
    let min_required_benefit = switching_cost * config.min_profit_multiplier;
    let is_profitable = expected_benefit > min_required_benefit;

    debug!(
        expected_benefit,
        min_required_benefit, is_profitable, "Reallocation check"
    );

    Ok(ReallocationCheck {
        is_profitable,
        switching_cost,
        expected_benefit,
        min_required_benefit,
    })
}
