use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Point-in-time market data for one pool, as delivered by a data provider.
///
/// Every field is optional on the wire; [`PoolSnapshot::metrics`] turns the
/// snapshot into validated [`PoolMetrics`] or names the first missing field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSnapshot {
    /// Trading volume over the last 24 hours, USD.
    pub volume_24h: Option<f64>,
    /// Liquidity-provider TVL of the pool, USD.
    pub tvl: Option<f64>,
    /// Reward tokens emitted per day across all farms.
    pub reward_emission_per_day: Option<f64>,
    /// Share of the emission allocated to this pool's farm (0–1).
    pub pool_weight: Option<f64>,
    /// Reward token price, USD.
    pub reward_token_price: Option<f64>,
    /// TVL staked in the farm, USD.
    pub staking_tvl: Option<f64>,
    /// Gas price in gwei.
    pub gas_price_gwei: Option<f64>,
    /// Native token price, USD.
    pub native_token_price: Option<f64>,
    /// Fee tier reported by the pool (fraction); informational.
    pub fee_tier: Option<f64>,
}

/// Validated snapshot values used by the accrual math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolMetrics {
    pub volume_24h: f64,
    pub tvl: f64,
    pub reward_emission_per_day: f64,
    pub pool_weight: f64,
    pub reward_token_price: f64,
    pub staking_tvl: f64,
    pub gas_price_gwei: f64,
    pub native_token_price: f64,
}

impl PoolSnapshot {
    /// Starts a snapshot from the trading side of the pool.
    #[must_use]
    pub fn new(volume_24h: f64, tvl: f64) -> Self {
        Self {
            volume_24h: Some(volume_24h),
            tvl: Some(tvl),
            ..Self::default()
        }
    }

    /// Sets the farm reward fields.
    #[must_use]
    pub fn with_farming(
        mut self,
        emission_per_day: f64,
        pool_weight: f64,
        reward_token_price: f64,
        staking_tvl: f64,
    ) -> Self {
        self.reward_emission_per_day = Some(emission_per_day);
        self.pool_weight = Some(pool_weight);
        self.reward_token_price = Some(reward_token_price);
        self.staking_tvl = Some(staking_tvl);
        self
    }

    /// Marks the pool as having no farm rewards.
    #[must_use]
    pub fn without_farming(self) -> Self {
        self.with_farming(0.0, 0.0, 0.0, 0.0)
    }

    /// Sets the gas market fields.
    #[must_use]
    pub fn with_gas(mut self, gas_price_gwei: f64, native_token_price: f64) -> Self {
        self.gas_price_gwei = Some(gas_price_gwei);
        self.native_token_price = Some(native_token_price);
        self
    }

    /// Sets the reported fee tier.
    #[must_use]
    pub fn with_fee_tier(mut self, fee_tier: f64) -> Self {
        self.fee_tier = Some(fee_tier);
        self
    }

    /// Validates the snapshot.
    ///
    /// # Errors
    /// [`RiskError::MissingSnapshotField`] for the first absent field,
    /// [`RiskError::InvalidInput`] for negative or non-finite values.
    pub fn metrics(&self) -> RiskResult<PoolMetrics> {
        fn require(value: Option<f64>, field: &'static str) -> RiskResult<f64> {
            let v = value.ok_or(RiskError::MissingSnapshotField(field))?;
            if !v.is_finite() || v < 0.0 {
                return Err(RiskError::InvalidInput(format!(
                    "pool snapshot field `{field}` must be non-negative, got {v}"
                )));
            }
            Ok(v)
        }

        Ok(PoolMetrics {
            volume_24h: require(self.volume_24h, "volume_24h")?,
            tvl: require(self.tvl, "tvl")?,
            reward_emission_per_day: require(
                self.reward_emission_per_day,
                "reward_emission_per_day",
            )?,
            pool_weight: require(self.pool_weight, "pool_weight")?,
            reward_token_price: require(self.reward_token_price, "reward_token_price")?,
            staking_tvl: require(self.staking_tvl, "staking_tvl")?,
            gas_price_gwei: require(self.gas_price_gwei, "gas_price_gwei")?,
            native_token_price: require(self.native_token_price, "native_token_price")?,
        })
    }
}
