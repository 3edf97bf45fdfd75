use serde::{Deserialize, Serialize};

/// Fee, farming, compounding and gas accrual.
pub mod fees;
/// Position valuation and impermanent loss.
pub mod impermanent_loss;

pub use impermanent_loss::{
    ConcentratedValuation, FullRangeValuation, PositionValuation, ValueModel,
};

/// Annual yield breakdown of a position, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldRates {
    /// Trading-fee APY while in range.
    pub fee_apy: f64,
    /// Farm reward APY.
    pub farming_apy: f64,
}

impl YieldRates {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.fee_apy + self.farming_apy
    }
}
