//! Reduction of simulated final values to summary statistics.
//!
//! Percentiles use nearest-rank indexing, `sorted[floor(n * p)]`, without
//! interpolation. Variances are population variances.

use lp_risk_domain::error::{RiskError, RiskResult};
use lp_risk_domain::estimation::population_moments;
use serde::{Deserialize, Serialize};

/// Summary of a simulation's final values against the initial investment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    pub draws: usize,
    pub initial_value: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    /// Mean of `final_value - initial_value`.
    pub return_mean: f64,
    pub return_std_dev: f64,
    pub return_variance: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_5: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub percentile_95: f64,
    /// Share of draws ending below the initial value.
    pub probability_of_loss: f64,
    /// `initial_value - percentile_5`; negative when no loss is expected at 95%.
    pub value_at_risk_5: f64,
}

/// Nearest-rank percentile of an ascending slice.
pub fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (sorted.len() as f64 * p).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

impl SimulationStatistics {
    /// Computes statistics over `values` (any order).
    ///
    /// # Errors
    /// [`RiskError::InvalidInput`] for an empty slice or non-finite values.
    pub fn from_values(values: &[f64], initial_value: f64) -> RiskResult<Self> {
        if values.is_empty() {
            return Err(RiskError::InvalidInput(
                "cannot summarize an empty simulation".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::InvalidInput(
                "simulation produced a non-finite value".to_string(),
            ));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let (mean, variance) = population_moments(&sorted);
        let returns: Vec<f64> = sorted.iter().map(|v| v - initial_value).collect();
        let (return_mean, return_variance) = population_moments(&returns);

        let losses = sorted.iter().filter(|v| **v < initial_value).count();
        let percentile_5 = nearest_rank(&sorted, 0.05);

        Ok(Self {
            draws: sorted.len(),
            initial_value,
            mean,
            median: nearest_rank(&sorted, 0.5),
            std_dev: variance.sqrt(),
            variance,
            return_mean,
            return_std_dev: return_variance.sqrt(),
            return_variance,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentile_5,
            percentile_25: nearest_rank(&sorted, 0.25),
            percentile_75: nearest_rank(&sorted, 0.75),
            percentile_95: nearest_rank(&sorted, 0.95),
            probability_of_loss: losses as f64 / sorted.len() as f64,
            value_at_risk_5: initial_value - percentile_5,
        })
    }

    /// Expected profit as a fraction of the initial value.
    #[must_use]
    pub fn expected_return_fraction(&self) -> f64 {
        if self.initial_value == 0.0 {
            return 0.0;
        }
        self.return_mean / self.initial_value
    }

    /// Standard deviation of returns as a fraction of the initial value.
    #[must_use]
    pub fn return_volatility_fraction(&self) -> f64 {
        if self.initial_value == 0.0 {
            return 0.0;
        }
        self.return_std_dev / self.initial_value
    }
}
