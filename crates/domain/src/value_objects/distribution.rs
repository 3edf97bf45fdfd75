use serde::{Deserialize, Serialize};

/// Calendar days used to annualize daily parameters.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Fitted lognormal return model (daily drift and volatility of log returns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParameters {
    /// Mean daily log return.
    pub mu: f64,
    /// Population standard deviation of daily log returns.
    pub sigma: f64,
    /// `mu * 365`.
    pub annualized_mu: f64,
    /// `sigma * sqrt(365)`.
    pub annualized_sigma: f64,
    /// Number of log returns the fit was computed from.
    pub sample_size: usize,
}

impl DistributionParameters {
    /// Builds parameters from daily moments, deriving the annualized pair.
    #[must_use]
    pub fn new(mu: f64, sigma: f64, sample_size: usize) -> Self {
        Self {
            mu,
            sigma,
            annualized_mu: mu * DAYS_PER_YEAR,
            annualized_sigma: sigma * DAYS_PER_YEAR.sqrt(),
            sample_size,
        }
    }

    /// Mean and standard deviation of the log return over `days`.
    #[must_use]
    pub fn horizon_moments(&self, days: f64) -> (f64, f64) {
        (days * self.mu, days.sqrt() * self.sigma)
    }

    /// True when the model produces no randomness.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.sigma == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annualization() {
        let params = DistributionParameters::new(0.001, 0.02, 30);
        assert!((params.annualized_mu - 0.365).abs() < 1e-12);
        assert!((params.annualized_sigma - 0.02 * 365f64.sqrt()).abs() < 1e-12);

        let (m, s) = params.horizon_moments(4.0);
        assert!((m - 0.004).abs() < 1e-12);
        assert!((s - 0.04).abs() < 1e-12);
    }
}
