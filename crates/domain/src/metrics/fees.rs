use crate::enums::PartialPeriodPolicy;
use crate::error::{RiskError, RiskResult};
use crate::metrics::YieldRates;
use crate::value_objects::distribution::DAYS_PER_YEAR;
use crate::value_objects::pool_snapshot::PoolMetrics;

/// Trading-fee APY per USD of effective liquidity once `contribution` joins the pool.
pub fn fee_apy(metrics: &PoolMetrics, fee_tier: f64, contribution: f64) -> f64 {
    let liquidity = metrics.tvl + contribution;
    if liquidity <= 0.0 {
        return 0.0;
    }
    metrics.volume_24h * fee_tier * DAYS_PER_YEAR / liquidity
}

/// Farm reward APY earned by a `contribution` USD stake.
pub fn farming_apy(metrics: &PoolMetrics, contribution: f64) -> f64 {
    let staked = metrics.staking_tvl + contribution;
    if staked <= 0.0 {
        return 0.0;
    }
    let daily_rewards_usd =
        metrics.reward_emission_per_day * metrics.pool_weight * metrics.reward_token_price;
    daily_rewards_usd * DAYS_PER_YEAR / staked
}

/// Fee and farming APYs for a deposit of `initial_value`.
///
/// Concentrated liquidity counts as `initial_value * capital_efficiency` of
/// effective liquidity: it takes a larger share of the same pool volume.
pub fn yield_rates(
    metrics: &PoolMetrics,
    fee_tier: f64,
    initial_value: f64,
    capital_efficiency: f64,
) -> YieldRates {
    YieldRates {
        fee_apy: capital_efficiency
            * fee_apy(metrics, fee_tier, initial_value * capital_efficiency),
        farming_apy: farming_apy(metrics, initial_value),
    }
}

/// Simple return over one harvest period of `harvest_days`.
pub fn period_return(apy: f64, harvest_days: u32) -> f64 {
    apy * f64::from(harvest_days) / DAYS_PER_YEAR
}

/// Number of harvest periods compounded over `days`.
pub fn compounding_periods(days: u32, harvest_days: u32, policy: PartialPeriodPolicy) -> f64 {
    if harvest_days == 0 {
        return 0.0;
    }
    match policy {
        PartialPeriodPolicy::Truncate => f64::from(days / harvest_days),
        PartialPeriodPolicy::Prorate => f64::from(days) / f64::from(harvest_days),
    }
}

/// Harvest transactions executed over `days` (completed periods only).
pub fn harvest_count(days: u32, harvest_days: u32) -> u32 {
    if harvest_days == 0 {
        return 0;
    }
    days / harvest_days
}

/// `(1 + fee + farming)^periods - 1`.
pub fn compound_return(period_fee_return: f64, period_farming_return: f64, periods: f64) -> f64 {
    (1.0 + period_fee_return + period_farming_return).powf(periods) - 1.0
}

/// USD gas cost of `transactions` transactions of `gas_units` each.
pub fn gas_cost(metrics: &PoolMetrics, gas_units: u64, transactions: u32) -> f64 {
    let per_tx = gas_units as f64 * metrics.gas_price_gwei * metrics.native_token_price / 1e9;
    per_tx * f64::from(transactions)
}

/// Annualizes a return earned over `days`.
pub fn calculate_apy(earned: f64, principal: f64, days: u32) -> RiskResult<f64> {
    if principal == 0.0 {
        return Err(RiskError::InvalidInput(
            "principal cannot be zero".to_string(),
        ));
    }
    if days == 0 {
        return Err(RiskError::InvalidInput("days cannot be zero".to_string()));
    }

    let roi = earned / principal;
    Ok(roi * (DAYS_PER_YEAR / f64::from(days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PoolMetrics {
        PoolMetrics {
            volume_24h: 1_000_000.0,
            tvl: 9_990_000.0,
            reward_emission_per_day: 10_000.0,
            pool_weight: 0.1,
            reward_token_price: 2.0,
            staking_tvl: 1_990_000.0,
            gas_price_gwei: 5.0,
            native_token_price: 600.0,
        }
    }

    #[test]
    fn test_fee_apy_includes_own_contribution() {
        // 1M * 0.0025 * 365 / (9.99M + 10k) = 0.09125
        let apy = fee_apy(&metrics(), 0.0025, 10_000.0);
        assert!((apy - 0.09125).abs() < 1e-12);
    }

    #[test]
    fn test_capital_efficiency_raises_fee_share_not_volume() {
        let plain = yield_rates(&metrics(), 0.0025, 10_000.0, 1.0);
        let concentrated = yield_rates(&metrics(), 0.0025, 10_000.0, 4.0);
        // Effective liquidity is four times larger; the pool's volume is unchanged.
        let expected = 4.0 * 1_000_000.0 * 0.0025 * 365.0 / (9_990_000.0 + 40_000.0);
        assert!((concentrated.fee_apy - expected).abs() < 1e-12);
        assert!(concentrated.fee_apy > plain.fee_apy);
        assert_eq!(plain.farming_apy, concentrated.farming_apy);
    }

    #[test]
    fn test_farming_apy() {
        // 10k * 0.1 * 2 = 2000 USD/day; * 365 / 2M = 0.365
        let apy = farming_apy(&metrics(), 10_000.0);
        assert!((apy - 0.365).abs() < 1e-12);
    }

    #[test]
    fn test_compounding_periods() {
        assert_eq!(compounding_periods(30, 7, PartialPeriodPolicy::Truncate), 4.0);
        let prorated = compounding_periods(30, 7, PartialPeriodPolicy::Prorate);
        assert!((prorated - 30.0 / 7.0).abs() < 1e-12);
        assert_eq!(harvest_count(30, 7), 4);
        assert_eq!(compounding_periods(30, 0, PartialPeriodPolicy::Truncate), 0.0);
    }

    #[test]
    fn test_compound_return() {
        let r = compound_return(0.01, 0.0, 2.0);
        assert!((r - 0.0201).abs() < 1e-12);
        assert_eq!(compound_return(0.01, 0.02, 0.0), 0.0);
    }

    #[test]
    fn test_gas_cost() {
        // 200k gas * 5 gwei * 600 USD / 1e9 = 0.6 USD per tx
        let cost = gas_cost(&metrics(), 200_000, 5);
        assert!((cost - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_apy() {
        let apy = calculate_apy(100.0, 10_000.0, 30).unwrap();
        assert!((apy - 0.01 * 365.0 / 30.0).abs() < 1e-12);
        assert!(calculate_apy(1.0, 0.0, 30).is_err());
        assert!(calculate_apy(1.0, 1.0, 0).is_err());
    }
}
