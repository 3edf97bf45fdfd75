//! Configuration for a simulation run.

use lp_risk_domain::enums::{NormalSampler, PartialPeriodPolicy};
use lp_risk_domain::error::{RiskError, RiskResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent terminal-price draws.
    pub draws: usize,
    /// Seed for the generator built by [`SimulationConfig::rng`]; `None` uses OS entropy.
    pub seed: Option<u64>,
    /// Gas units consumed by one deposit or harvest transaction.
    pub gas_units_per_tx: u64,
    /// Standard-normal sampling algorithm.
    pub normal_sampler: NormalSampler,
    /// Treatment of a trailing partial harvest period.
    pub partial_period: PartialPeriodPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            draws: 1000,
            seed: None,
            gas_units_per_tx: 200_000,
            normal_sampler: NormalSampler::BoxMuller,
            partial_period: PartialPeriodPolicy::Truncate,
        }
    }
}

impl SimulationConfig {
    /// Creates a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of draws.
    #[must_use]
    pub fn with_draws(mut self, draws: usize) -> Self {
        self.draws = draws;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the gas units per transaction.
    #[must_use]
    pub fn with_gas_units(mut self, gas_units: u64) -> Self {
        self.gas_units_per_tx = gas_units;
        self
    }

    /// Sets the normal sampler.
    #[must_use]
    pub fn with_normal_sampler(mut self, sampler: NormalSampler) -> Self {
        self.normal_sampler = sampler;
        self
    }

    /// Sets the partial-period policy.
    #[must_use]
    pub fn with_partial_period(mut self, policy: PartialPeriodPolicy) -> Self {
        self.partial_period = policy;
        self
    }

    /// Rejects a zero draw count.
    pub fn validate(&self) -> RiskResult<()> {
        if self.draws == 0 {
            return Err(RiskError::InvalidInput(
                "simulation requires at least one draw".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds a generator from the configured seed.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.draws, 1000);
        assert_eq!(config.normal_sampler, NormalSampler::BoxMuller);
        assert_eq!(config.partial_period, PartialPeriodPolicy::Truncate);
        assert!(config.validate().is_ok());
        assert!(config.with_draws(0).validate().is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SimulationConfig::new().with_seed(7);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
