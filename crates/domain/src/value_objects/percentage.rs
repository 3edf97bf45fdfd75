use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// A ratio held as a fraction (`0.05` is 5%).
///
/// Conversion to a 0–100 figure happens only through [`Percentage::as_percent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    /// Wraps a float fraction; non-finite input maps to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        Self(Decimal::from_f64(fraction).unwrap_or(Decimal::ZERO))
    }

    pub fn as_fraction(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Value on the 0–100 scale, rounded to `dp` decimal places.
    pub fn as_percent(&self, dp: u32) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).round_dp(dp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_presentation() {
        let p = Percentage::from_fraction(0.123456);
        assert_eq!(p.as_percent(2), dec!(12.35));
        assert!((p.as_fraction() - 0.123456).abs() < 1e-12);
        assert_eq!(Percentage::from_fraction(f64::NAN).0, Decimal::ZERO);
    }
}
