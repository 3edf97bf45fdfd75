//! Monte Carlo runner for a single position.
//!
//! Yield rates, compounding periods and gas are fixed for the run; only the
//! terminal price varies between draws. A draw's final value is
//!
//! `hold_value * il_factor * (1 + compounded_return) - gas_cost`
//!
//! where fees stop accruing when a concentrated position ends out of range.

use crate::config::SimulationConfig;
use crate::price_path::{TerminalPriceModel, standard_normal};
use lp_risk_domain::error::RiskResult;
use lp_risk_domain::metrics::fees::{
    compound_return, compounding_periods, gas_cost, harvest_count, period_return, yield_rates,
};
use lp_risk_domain::metrics::{PositionValuation, ValueModel, YieldRates};
use lp_risk_domain::value_objects::distribution::DistributionParameters;
use lp_risk_domain::value_objects::pool_snapshot::PoolMetrics;
use lp_risk_domain::value_objects::position_config::PositionConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one simulated terminal price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub terminal_price: f64,
    pub il_factor: f64,
    pub in_range: bool,
    pub final_value: f64,
}

/// Raw output of a run: one final value per draw, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub final_values: Vec<f64>,
    /// Mean of `il_factor - 1` across draws.
    pub mean_impermanent_loss: f64,
    /// Share of draws ending inside the range (1.0 for full range).
    pub in_range_fraction: f64,
    pub yield_rates: YieldRates,
    /// Gas cost charged to every draw, USD.
    pub gas_cost: f64,
    /// Return compounded by a draw that stays in range.
    pub compounded_return: f64,
}

/// Simulates one position under a fitted price model and a pool snapshot.
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    pub valuation: PositionValuation,
    pub initial_value: f64,
    pub days: u32,
    pub harvest_days: u32,
    pub fee_tier: f64,
    pub pool: PoolMetrics,
    pub price_model: TerminalPriceModel,
    pub config: SimulationConfig,
}

impl MonteCarloRunner {
    /// Creates a runner for `position` valued by `valuation`.
    ///
    /// # Errors
    /// Fails when the position or the simulation config is invalid.
    pub fn new(
        position: &PositionConfig,
        valuation: PositionValuation,
        harvest_days: u32,
        parameters: &DistributionParameters,
        pool: PoolMetrics,
        config: SimulationConfig,
    ) -> RiskResult<Self> {
        position.validate()?;
        config.validate()?;
        let price_model = TerminalPriceModel::new(
            position.entry_price,
            parameters,
            position.days,
            config.normal_sampler,
        );
        Ok(Self {
            valuation,
            initial_value: position.initial_value,
            days: position.days,
            harvest_days,
            fee_tier: position.fee_tier,
            pool,
            price_model,
            config,
        })
    }

    /// Fee and farming APYs for this deposit.
    #[must_use]
    pub fn yield_rates(&self) -> YieldRates {
        yield_rates(
            &self.pool,
            self.fee_tier,
            self.initial_value,
            self.valuation.capital_efficiency(),
        )
    }

    /// Gas for the deposit plus every completed harvest.
    #[must_use]
    pub fn gas_cost(&self) -> f64 {
        let transactions = harvest_count(self.days, self.harvest_days) + 1;
        gas_cost(&self.pool, self.config.gas_units_per_tx, transactions)
    }

    fn periods(&self) -> f64 {
        compounding_periods(self.days, self.harvest_days, self.config.partial_period)
    }

    /// Evaluates one draw for a given standard-normal shock.
    #[must_use]
    pub fn evaluate_shock(&self, z: f64) -> DrawOutcome {
        self.evaluate_price(
            self.price_model.price_for_shock(z),
            &self.yield_rates(),
            self.periods(),
            self.gas_cost(),
        )
    }

    fn evaluate_price(
        &self,
        terminal_price: f64,
        rates: &YieldRates,
        periods: f64,
        gas: f64,
    ) -> DrawOutcome {
        let in_range = self.valuation.is_in_range(terminal_price);
        let il_factor = self.valuation.il_factor(terminal_price);
        let hold_value = self.valuation.hold_value_at(terminal_price);

        let period_fee = if in_range {
            period_return(rates.fee_apy, self.harvest_days)
        } else {
            0.0
        };
        let period_farming = period_return(rates.farming_apy, self.harvest_days);
        let compounded = compound_return(period_fee, period_farming, periods);

        DrawOutcome {
            terminal_price,
            il_factor,
            in_range,
            final_value: hold_value * il_factor * (1.0 + compounded) - gas,
        }
    }

    /// Runs `config.draws` independent draws.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationRun {
        self.run_draws(rng, self.config.draws)
    }

    /// Runs exactly `draws` independent draws.
    pub fn run_draws<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> SimulationRun {
        let rates = self.yield_rates();
        let periods = self.periods();
        let gas = self.gas_cost();

        let mut final_values = Vec::with_capacity(draws);
        let mut il_sum = 0.0;
        let mut in_range_count = 0usize;

        for _ in 0..draws {
            let z = standard_normal(rng, self.price_model.sampler);
            let outcome =
                self.evaluate_price(self.price_model.price_for_shock(z), &rates, periods, gas);
            il_sum += outcome.il_factor - 1.0;
            if outcome.in_range {
                in_range_count += 1;
            }
            final_values.push(outcome.final_value);
        }

        let n = draws.max(1) as f64;
        let compounded_return = compound_return(
            period_return(rates.fee_apy, self.harvest_days),
            period_return(rates.farming_apy, self.harvest_days),
            periods,
        );

        debug!(
            draws,
            fee_apy = rates.fee_apy,
            farming_apy = rates.farming_apy,
            gas_cost = gas,
            "Monte Carlo run complete"
        );

        SimulationRun {
            final_values,
            mean_impermanent_loss: il_sum / n,
            in_range_fraction: in_range_count as f64 / n,
            yield_rates: rates,
            gas_cost: gas,
            compounded_return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_risk_domain::metrics::{ConcentratedValuation, FullRangeValuation};
    use lp_risk_domain::value_objects::price_range::PriceRange;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool() -> PoolMetrics {
        PoolMetrics {
            volume_24h: 2_000_000.0,
            tvl: 20_000_000.0,
            reward_emission_per_day: 10_000.0,
            pool_weight: 0.05,
            reward_token_price: 2.0,
            staking_tvl: 5_000_000.0,
            gas_price_gwei: 3.0,
            native_token_price: 600.0,
        }
    }

    fn full_range_runner(sigma: f64) -> MonteCarloRunner {
        let position = PositionConfig::full_range(10_000.0, 30, 650.0, 0.0025, 7);
        let valuation = PositionValuation::FullRange(FullRangeValuation::new(10_000.0, 650.0));
        let params = DistributionParameters::new(0.0, sigma, 90);
        MonteCarloRunner::new(
            &position,
            valuation,
            7,
            &params,
            pool(),
            SimulationConfig::default().with_draws(500),
        )
        .unwrap()
    }

    #[test]
    fn test_run_produces_exactly_n_values() {
        let runner = full_range_runner(0.04);
        let mut rng = StdRng::seed_from_u64(3);
        let run = runner.run(&mut rng);
        assert_eq!(run.final_values.len(), 500);
        assert_eq!(runner.run_draws(&mut rng, 17).final_values.len(), 17);
        assert_eq!(run.in_range_fraction, 1.0);
        assert!(run.mean_impermanent_loss <= 0.0);
    }

    #[test]
    fn test_same_seed_same_values() {
        let runner = full_range_runner(0.04);
        let a = runner.run(&mut StdRng::seed_from_u64(11));
        let b = runner.run(&mut StdRng::seed_from_u64(11));
        assert_eq!(a.final_values, b.final_values);
    }

    #[test]
    fn test_gas_counts_deposit_and_harvests() {
        let runner = full_range_runner(0.0);
        // 30 days / 7 = 4 harvests + 1 deposit; 200k * 3 gwei * 600 / 1e9 = 0.36 per tx
        assert!((runner.gas_cost() - 5.0 * 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_zero_shock_matches_closed_form() {
        let runner = full_range_runner(0.0);
        let outcome = runner.evaluate_shock(0.0);
        let rates = runner.yield_rates();
        let expected_growth = (1.0
            + period_return(rates.fee_apy, 7)
            + period_return(rates.farming_apy, 7))
        .powf(4.0);
        let expected = 10_000.0 * expected_growth - runner.gas_cost();
        assert_eq!(outcome.il_factor, 1.0);
        assert!((outcome.final_value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_draw_earns_no_fees() {
        let position = PositionConfig::concentrated(10_000.0, 30, 650.0, 0.0025)
            .with_range(580.0, 720.0)
            .with_harvest_days(7);
        let range = PriceRange::new(580.0, 720.0).unwrap();
        let valuation = PositionValuation::Concentrated(
            ConcentratedValuation::new(10_000.0, 650.0, range).unwrap(),
        );
        let params = DistributionParameters::new(0.0, 0.1, 90);
        let runner = MonteCarloRunner::new(
            &position,
            valuation,
            7,
            &params,
            pool(),
            SimulationConfig::default(),
        )
        .unwrap();

        let rates = runner.yield_rates();
        let farm_only = compound_return(0.0, period_return(rates.farming_apy, 7), 4.0);

        // A +2 sigma-per-day shock over 30 days lands far above the range.
        let outcome = runner.evaluate_shock(2.0);
        assert!(!outcome.in_range);
        let pool_value = runner.valuation.value_at(outcome.terminal_price);
        let expected = pool_value * (1.0 + farm_only) - runner.gas_cost();
        assert!((outcome.final_value - expected).abs() < 1e-6);
    }
}
