use crate::enums::PositionKind;
use crate::error::{RiskError, RiskResult};
use crate::value_objects::price_range::PriceRange;
use serde::{Deserialize, Serialize};

/// Decision variables and starting conditions for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionConfig {
    /// Capital allocated, USD.
    pub initial_value: f64,
    /// Holding horizon in days.
    pub days: u32,
    /// Price ratio at entry.
    pub entry_price: f64,
    /// Pool fee tier as a fraction (0.0025 for 25 bps).
    pub fee_tier: f64,
    pub kind: PositionKind,
    /// Harvest (compounding) period in days.
    #[serde(default)]
    pub harvest_days: Option<u32>,
    #[serde(default)]
    pub lower_price: Option<f64>,
    #[serde(default)]
    pub upper_price: Option<f64>,
    /// Let the range optimizer choose bounds and harvest period.
    #[serde(default)]
    pub optimize_range: bool,
}

/// How the range and harvest schedule of a position are settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangePlan {
    FullRange { harvest_days: u32 },
    Fixed { range: PriceRange, harvest_days: u32 },
    Optimize,
}

impl PositionConfig {
    /// A full-range position harvested every `harvest_days`.
    #[must_use]
    pub fn full_range(
        initial_value: f64,
        days: u32,
        entry_price: f64,
        fee_tier: f64,
        harvest_days: u32,
    ) -> Self {
        Self {
            initial_value,
            days,
            entry_price,
            fee_tier,
            kind: PositionKind::FullRange,
            harvest_days: Some(harvest_days),
            lower_price: None,
            upper_price: None,
            optimize_range: false,
        }
    }

    /// A concentrated position; bounds and harvest period still to be set.
    #[must_use]
    pub fn concentrated(initial_value: f64, days: u32, entry_price: f64, fee_tier: f64) -> Self {
        Self {
            kind: PositionKind::Concentrated,
            harvest_days: None,
            ..Self::full_range(initial_value, days, entry_price, fee_tier, 0)
        }
    }

    #[must_use]
    pub fn with_range(mut self, lower: f64, upper: f64) -> Self {
        self.lower_price = Some(lower);
        self.upper_price = Some(upper);
        self
    }

    #[must_use]
    pub fn with_harvest_days(mut self, harvest_days: u32) -> Self {
        self.harvest_days = Some(harvest_days);
        self
    }

    #[must_use]
    pub fn with_range_optimization(mut self) -> Self {
        self.optimize_range = true;
        self
    }

    /// Validates the scalar inputs.
    pub fn validate(&self) -> RiskResult<()> {
        if !(self.initial_value.is_finite() && self.initial_value > 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "initial value must be positive, got {}",
                self.initial_value
            )));
        }
        if self.days == 0 {
            return Err(RiskError::InvalidInput(
                "holding period must be at least one day".to_string(),
            ));
        }
        if !(self.entry_price.is_finite() && self.entry_price > 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "entry price must be positive, got {}",
                self.entry_price
            )));
        }
        if !(0.0..1.0).contains(&self.fee_tier) {
            return Err(RiskError::InvalidInput(format!(
                "fee tier must be a fraction in [0, 1), got {}",
                self.fee_tier
            )));
        }
        Ok(())
    }

    /// Validates the configuration and decides how the range is settled.
    ///
    /// # Errors
    /// [`RiskError::InvalidRangeConfiguration`] when a concentrated position
    /// has neither complete explicit bounds with a harvest period nor an
    /// optimization request, or when the bounds do not bracket the entry price.
    pub fn plan(&self) -> RiskResult<RangePlan> {
        self.validate()?;
        let harvest = self.harvest_days.map(|h| {
            if h == 0 {
                Err(RiskError::InvalidRangeConfiguration(
                    "harvest period must be at least one day".to_string(),
                ))
            } else {
                Ok(h)
            }
        });

        match self.kind {
            PositionKind::FullRange => {
                if self.lower_price.is_some() || self.upper_price.is_some() {
                    return Err(RiskError::InvalidRangeConfiguration(
                        "full-range positions do not take price bounds".to_string(),
                    ));
                }
                let harvest_days = harvest.ok_or_else(|| {
                    RiskError::InvalidRangeConfiguration(
                        "full-range positions require a harvest period".to_string(),
                    )
                })??;
                Ok(RangePlan::FullRange { harvest_days })
            }
            PositionKind::Concentrated => match (self.lower_price, self.upper_price, harvest) {
                (Some(lower), Some(upper), Some(harvest_days)) => {
                    let range = PriceRange::new(lower, upper)?;
                    range.ensure_contains_entry(self.entry_price)?;
                    Ok(RangePlan::Fixed {
                        range,
                        harvest_days: harvest_days?,
                    })
                }
                (None, None, _) if self.optimize_range => Ok(RangePlan::Optimize),
                (Some(_), Some(_), None) if self.optimize_range => Ok(RangePlan::Optimize),
                (lower, upper, _) if lower.is_some() != upper.is_some() => {
                    Err(RiskError::InvalidRangeConfiguration(
                        "both lower and upper price bounds are required".to_string(),
                    ))
                }
                _ => Err(RiskError::InvalidRangeConfiguration(
                    "supply explicit bounds with a harvest period or request range optimization"
                        .to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_plan() {
        let config = PositionConfig::full_range(10_000.0, 30, 650.0, 0.0025, 7);
        assert_eq!(config.plan().unwrap(), RangePlan::FullRange { harvest_days: 7 });

        let no_harvest = PositionConfig {
            harvest_days: None,
            ..config.clone()
        };
        assert!(matches!(
            no_harvest.plan(),
            Err(RiskError::InvalidRangeConfiguration(_))
        ));
    }

    #[test]
    fn test_explicit_range_plan() {
        let config = PositionConfig::concentrated(10_000.0, 30, 650.0, 0.0025)
            .with_range(580.0, 720.0)
            .with_harvest_days(7);
        match config.plan().unwrap() {
            RangePlan::Fixed {
                range,
                harvest_days,
            } => {
                assert_eq!(range.lower_price, 580.0);
                assert_eq!(harvest_days, 7);
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn test_range_must_bracket_entry() {
        let config = PositionConfig::concentrated(10_000.0, 30, 750.0, 0.0025)
            .with_range(580.0, 720.0)
            .with_harvest_days(7);
        assert!(matches!(
            config.plan(),
            Err(RiskError::InvalidRangeConfiguration(_))
        ));
    }

    #[test]
    fn test_concentrated_requires_range_or_optimization() {
        let bare = PositionConfig::concentrated(10_000.0, 30, 650.0, 0.0025);
        assert!(matches!(
            bare.plan(),
            Err(RiskError::InvalidRangeConfiguration(_))
        ));

        let half = bare.clone().with_harvest_days(7);
        let half = PositionConfig {
            lower_price: Some(600.0),
            ..half
        };
        assert!(half.plan().is_err());

        let optimized = bare.with_range_optimization();
        assert_eq!(optimized.plan().unwrap(), RangePlan::Optimize);
    }

    #[test]
    fn test_scalar_validation() {
        let config = PositionConfig::full_range(0.0, 30, 650.0, 0.0025, 7);
        assert!(matches!(config.plan(), Err(RiskError::InvalidInput(_))));
        let config = PositionConfig::full_range(100.0, 0, 650.0, 0.0025, 7);
        assert!(config.validate().is_err());
        let config = PositionConfig::full_range(100.0, 30, 650.0, 1.5, 7);
        assert!(config.validate().is_err());
    }
}
