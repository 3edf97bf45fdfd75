/// Concentrated-liquidity token amount formulas.
pub mod concentrated_liquidity;
/// Standard normal distribution helpers.
pub mod normal;
