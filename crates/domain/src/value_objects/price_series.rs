use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Chronological, daily-sampled series of positive price ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Creates a series, rejecting non-finite or non-positive prices.
    ///
    /// Short series are accepted here; estimation reports them as
    /// [`RiskError::InsufficientData`].
    pub fn new(prices: Vec<f64>) -> RiskResult<Self> {
        if let Some((idx, p)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(RiskError::InvalidInput(format!(
                "price at index {idx} must be positive and finite, got {p}"
            )));
        }
        Ok(Self { prices })
    }

    /// Raw prices in chronological order.
    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Log returns `ln(P_i / P_{i-1})`, one fewer than the number of prices.
    #[must_use]
    pub fn log_returns(&self) -> Vec<f64> {
        self.prices
            .windows(2)
            .map(|w| (w[1] / w[0]).ln())
            .collect()
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = RiskError;

    fn try_from(prices: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(prices)
    }
}

impl From<PriceSeries> for Vec<f64> {
    fn from(series: PriceSeries) -> Self {
        series.prices
    }
}
