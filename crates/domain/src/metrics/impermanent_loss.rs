//! Closed-form valuation of liquidity positions at an arbitrary terminal price.
//!
//! Both variants compare the rebalanced pool holdings against the quantities
//! deposited at entry and never touched afterwards. The ratio of the two is
//! the impermanent-loss factor; it is exactly `1.0` at the entry price.

use crate::error::{RiskError, RiskResult};
use crate::math::concentrated_liquidity::{amounts_at_price, liquidity_for_value};
use crate::value_objects::price_range::PriceRange;
use serde::{Deserialize, Serialize};

/// Valuation interface shared by full-range and concentrated positions.
pub trait ValueModel {
    /// USD value of the pool holdings at `price`.
    fn value_at(&self, price: f64) -> f64;

    /// USD value at `price` of the quantities deposited at entry.
    fn hold_value_at(&self, price: f64) -> f64;

    /// Multiplier applied to fee share from concentrating liquidity.
    fn capital_efficiency(&self) -> f64 {
        1.0
    }

    /// Pool value over hold value at `price`.
    fn il_factor(&self, price: f64) -> f64 {
        let hold = self.hold_value_at(price);
        if hold <= 0.0 {
            return 1.0;
        }
        self.value_at(price) / hold
    }

    /// Whether fees accrue at `price`.
    fn is_in_range(&self, _price: f64) -> bool {
        true
    }
}

/// 50/50 constant-product position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullRangeValuation {
    pub initial_value: f64,
    pub entry_price: f64,
}

impl FullRangeValuation {
    #[must_use]
    pub fn new(initial_value: f64, entry_price: f64) -> Self {
        Self {
            initial_value,
            entry_price,
        }
    }
}

impl ValueModel for FullRangeValuation {
    fn value_at(&self, price: f64) -> f64 {
        self.initial_value * (price / self.entry_price).sqrt()
    }

    fn hold_value_at(&self, price: f64) -> f64 {
        self.initial_value / 2.0 * (price / self.entry_price + 1.0)
    }
}

/// Position with liquidity concentrated in a [`PriceRange`].
///
/// Liquidity is normalized so that the position is worth `initial_value`
/// at `entry_price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentratedValuation {
    pub range: PriceRange,
    pub entry_price: f64,
    pub liquidity: f64,
    held_base: f64,
    held_quote: f64,
}

impl ConcentratedValuation {
    /// # Errors
    /// Returns [`RiskError::InvalidRangeConfiguration`] if the range does not
    /// bracket the entry price, or [`RiskError::InvalidInput`] for a
    /// non-positive value.
    pub fn new(initial_value: f64, entry_price: f64, range: PriceRange) -> RiskResult<Self> {
        if !(initial_value > 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "initial value must be positive, got {initial_value}"
            )));
        }
        range.ensure_contains_entry(entry_price)?;
        let liquidity = liquidity_for_value(initial_value, entry_price, &range);
        let (held_base, held_quote) = amounts_at_price(liquidity, entry_price, &range);
        Ok(Self {
            range,
            entry_price,
            liquidity,
            held_base,
            held_quote,
        })
    }
}

impl ValueModel for ConcentratedValuation {
    fn value_at(&self, price: f64) -> f64 {
        let (base, quote) = amounts_at_price(self.liquidity, price, &self.range);
        quote + base * price
    }

    fn hold_value_at(&self, price: f64) -> f64 {
        self.held_quote + self.held_base * price
    }

    fn capital_efficiency(&self) -> f64 {
        self.range.capital_efficiency()
    }

    fn is_in_range(&self, price: f64) -> bool {
        self.range.contains(price)
    }
}

/// Either valuation variant, chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionValuation {
    FullRange(FullRangeValuation),
    Concentrated(ConcentratedValuation),
}

impl ValueModel for PositionValuation {
    fn value_at(&self, price: f64) -> f64 {
        match self {
            Self::FullRange(v) => v.value_at(price),
            Self::Concentrated(v) => v.value_at(price),
        }
    }

    fn hold_value_at(&self, price: f64) -> f64 {
        match self {
            Self::FullRange(v) => v.hold_value_at(price),
            Self::Concentrated(v) => v.hold_value_at(price),
        }
    }

    fn capital_efficiency(&self) -> f64 {
        match self {
            Self::FullRange(v) => v.capital_efficiency(),
            Self::Concentrated(v) => v.capital_efficiency(),
        }
    }

    fn is_in_range(&self, price: f64) -> bool {
        match self {
            Self::FullRange(v) => v.is_in_range(price),
            Self::Concentrated(v) => v.is_in_range(price),
        }
    }
}

impl PositionValuation {
    /// Price range of a concentrated position.
    #[must_use]
    pub fn range(&self) -> Option<PriceRange> {
        match self {
            Self::FullRange(_) => None,
            Self::Concentrated(v) => Some(v.range),
        }
    }
}
