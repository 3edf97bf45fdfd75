use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Price bounds `[lower_price, upper_price]` of a concentrated position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: f64,
    pub upper_price: f64,
}

impl PriceRange {
    /// Creates a range with `0 < lower < upper`.
    pub fn new(lower: f64, upper: f64) -> RiskResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower <= 0.0 {
            return Err(RiskError::InvalidRangeConfiguration(format!(
                "bounds must be positive and finite, got [{lower}, {upper}]"
            )));
        }
        if lower >= upper {
            return Err(RiskError::InvalidRangeConfiguration(format!(
                "lower bound {lower} must be below upper bound {upper}"
            )));
        }
        Ok(Self {
            lower_price: lower,
            upper_price: upper,
        })
    }

    /// Range of total relative `width` centred on `center`,
    /// i.e. `[center * (1 - width/2), center * (1 + width/2)]`.
    pub fn symmetric(center: f64, width: f64) -> RiskResult<Self> {
        if !(width > 0.0 && width < 2.0) {
            return Err(RiskError::InvalidRangeConfiguration(format!(
                "symmetric width must be in (0, 2), got {width}"
            )));
        }
        let half = width / 2.0;
        Self::new(center * (1.0 - half), center * (1.0 + half))
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower_price && price <= self.upper_price
    }

    /// `sqrt(upper / lower)`.
    pub fn capital_efficiency(&self) -> f64 {
        (self.upper_price / self.lower_price).sqrt()
    }

    /// Requires `lower < entry < upper`.
    pub fn ensure_contains_entry(&self, entry_price: f64) -> RiskResult<()> {
        if entry_price <= self.lower_price {
            return Err(RiskError::InvalidRangeConfiguration(format!(
                "lower bound {} must be below entry price {entry_price}",
                self.lower_price
            )));
        }
        if entry_price >= self.upper_price {
            return Err(RiskError::InvalidRangeConfiguration(format!(
                "entry price {entry_price} must be below upper bound {}",
                self.upper_price
            )));
        }
        Ok(())
    }
}
