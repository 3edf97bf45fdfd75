//! Analysis output.
//!
//! [`YieldReport`] keeps every quantity as an `f64` fraction or USD amount.
//! [`ReportSummary`] is the presentation form: decimals rounded for display
//! and percentages on the 0–100 scale.

use lp_risk_domain::enums::PositionKind;
use lp_risk_domain::metrics::YieldRates;
use lp_risk_domain::metrics::fees::calculate_apy;
use lp_risk_domain::value_objects::distribution::DistributionParameters;
use lp_risk_domain::value_objects::percentage::Percentage;
use lp_risk_domain::value_objects::price_range::PriceRange;
use lp_risk_optimization::RangeCandidate;
use lp_risk_simulation::monte_carlo::SimulationRun;
use lp_risk_simulation::statistics::SimulationStatistics;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Result of analyzing one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldReport {
    pub kind: PositionKind,
    pub initial_value: f64,
    pub days: u32,
    /// Harvest period actually simulated.
    pub harvest_days: u32,
    pub parameters: DistributionParameters,
    /// Mean final value, USD.
    pub expected_value: f64,
    /// Mean profit, USD.
    pub expected_return: f64,
    pub expected_return_fraction: f64,
    /// `expected_return_fraction * 365 / days`.
    pub annualized_apy: f64,
    /// Mean of `il_factor - 1` across draws.
    pub mean_impermanent_loss: f64,
    pub yield_rates: YieldRates,
    pub gas_cost: f64,
    pub in_range_fraction: f64,
    pub statistics: SimulationStatistics,
    /// Simulated bounds; `None` for full range.
    pub range: Option<PriceRange>,
    pub capital_efficiency: Option<f64>,
    /// Winning grid candidate when the range was optimized.
    pub optimal_range: Option<RangeCandidate>,
    /// Final value of every draw, in draw order.
    pub final_values: Vec<f64>,
}

impl YieldReport {
    /// Assembles a report from a finished run.
    #[allow(clippy::too_many_arguments)]
    pub fn from_run(
        kind: PositionKind,
        days: u32,
        harvest_days: u32,
        parameters: DistributionParameters,
        run: SimulationRun,
        statistics: SimulationStatistics,
        range: Option<PriceRange>,
        optimal_range: Option<RangeCandidate>,
    ) -> Self {
        let expected_return_fraction = statistics.expected_return_fraction();
        Self {
            kind,
            initial_value: statistics.initial_value,
            days,
            harvest_days,
            parameters,
            expected_value: statistics.mean,
            expected_return: statistics.return_mean,
            expected_return_fraction,
            annualized_apy: calculate_apy(statistics.return_mean, statistics.initial_value, days)
                .unwrap_or_default(),
            mean_impermanent_loss: run.mean_impermanent_loss,
            yield_rates: run.yield_rates,
            gas_cost: run.gas_cost,
            in_range_fraction: run.in_range_fraction,
            statistics,
            range,
            capital_efficiency: range.map(|r| r.capital_efficiency()),
            optimal_range,
            final_values: run.final_values,
        }
    }

    /// Expected return per unit of return volatility; `None` for a
    /// deterministic outcome.
    #[must_use]
    pub fn risk_adjusted_return(&self) -> Option<f64> {
        let vol = self.statistics.return_volatility_fraction();
        if vol > 0.0 {
            Some(self.expected_return_fraction / vol)
        } else {
            None
        }
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from(self)
    }
}

/// Display-ready view of a [`YieldReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub initial_value: Decimal,
    pub expected_value: Decimal,
    pub expected_return: Decimal,
    pub expected_return_pct: Decimal,
    pub annualized_apy_pct: Decimal,
    pub impermanent_loss_pct: Decimal,
    pub fee_apy_pct: Decimal,
    pub farming_apy_pct: Decimal,
    pub gas_cost: Decimal,
    pub in_range_pct: Decimal,
    pub percentile_5: Decimal,
    pub percentile_25: Decimal,
    pub median: Decimal,
    pub percentile_75: Decimal,
    pub percentile_95: Decimal,
    pub probability_of_loss_pct: Decimal,
    pub value_at_risk_5: Decimal,
    pub harvest_days: u32,
    pub lower_price: Option<Decimal>,
    pub upper_price: Option<Decimal>,
    pub capital_efficiency: Option<Decimal>,
}

fn usd(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

fn pct(fraction: f64) -> Decimal {
    Percentage::from_fraction(fraction).as_percent(2)
}

fn price(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(6)
}

impl From<&YieldReport> for ReportSummary {
    fn from(report: &YieldReport) -> Self {
        let stats = &report.statistics;
        Self {
            initial_value: usd(report.initial_value),
            expected_value: usd(report.expected_value),
            expected_return: usd(report.expected_return),
            expected_return_pct: pct(report.expected_return_fraction),
            annualized_apy_pct: pct(report.annualized_apy),
            impermanent_loss_pct: pct(report.mean_impermanent_loss),
            fee_apy_pct: pct(report.yield_rates.fee_apy),
            farming_apy_pct: pct(report.yield_rates.farming_apy),
            gas_cost: usd(report.gas_cost),
            in_range_pct: pct(report.in_range_fraction),
            percentile_5: usd(stats.percentile_5),
            percentile_25: usd(stats.percentile_25),
            median: usd(stats.median),
            percentile_75: usd(stats.percentile_75),
            percentile_95: usd(stats.percentile_95),
            probability_of_loss_pct: pct(stats.probability_of_loss),
            value_at_risk_5: usd(stats.value_at_risk_5),
            harvest_days: report.harvest_days,
            lower_price: report.range.map(|r| price(r.lower_price)),
            upper_price: report.range.map(|r| price(r.upper_price)),
            capital_efficiency: report
                .capital_efficiency
                .map(|ce| Decimal::from_f64(ce).unwrap_or_default().round_dp(4)),
        }
    }
}
