use serde::{Deserialize, Serialize};

/// Shape of the liquidity provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionKind {
    /// Constant-product liquidity over the whole price curve.
    FullRange,
    /// Liquidity concentrated inside `[lower, upper]`.
    Concentrated,
}

/// Algorithm used to turn uniforms into standard-normal shocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalSampler {
    /// Box–Muller on two open-interval uniforms.
    #[default]
    BoxMuller,
    /// Ziggurat sampler from `rand_distr`.
    Ziggurat,
}

/// Treatment of a trailing harvest period shorter than `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartialPeriodPolicy {
    /// Drop the trailing partial period (`floor(days / h)` periods).
    #[default]
    Truncate,
    /// Compound the trailing fraction as a fractional period.
    Prorate,
}
