//! Maximum-likelihood fit of a lognormal return model.
//!
//! The series is assumed to be sampled daily; moments are population
//! moments (divided by `n`, not `n - 1`).

use crate::error::{RiskError, RiskResult};
use crate::value_objects::distribution::DistributionParameters;
use crate::value_objects::price_series::PriceSeries;
use tracing::{debug, warn};

/// Fits drift and volatility of daily log returns.
///
/// # Errors
/// [`RiskError::InsufficientData`] when the series has fewer than two prices.
pub fn estimate_parameters(series: &PriceSeries) -> RiskResult<DistributionParameters> {
    if series.len() < 2 {
        return Err(RiskError::InsufficientData {
            points: series.len(),
        });
    }

    let returns = series.log_returns();
    let (mu, variance) = population_moments(&returns);
    let sigma = variance.sqrt();

    if sigma == 0.0 {
        warn!(
            samples = returns.len(),
            "Zero-variance price history, simulation will be deterministic"
        );
    }
    debug!(mu, sigma, samples = returns.len(), "Estimated return distribution");

    Ok(DistributionParameters::new(mu, sigma, returns.len()))
}

/// Mean and population variance of `values`; `(0, 0)` when empty.
pub fn population_moments(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}
