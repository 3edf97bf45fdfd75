//! Monte Carlo simulation of liquidity-position outcomes.
//!
//! Each run draws independent terminal prices from a fitted lognormal model,
//! values the position at each price, and accrues fees, farm rewards and gas.
//! Randomness always comes from a caller-supplied generator.

/// Simulation configuration.
pub mod config;
/// Monte Carlo runner.
pub mod monte_carlo;
/// Prelude module for convenient imports.
pub mod prelude;
/// Terminal price sampling.
pub mod price_path;
/// Statistical aggregation of simulated values.
pub mod statistics;
