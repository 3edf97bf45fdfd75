//! Domain model for liquidity-position yield and risk estimation.
//!
//! This crate holds the leaves of the computation:
//! - Value objects shared by every layer (price series, snapshots, configs)
//! - The error taxonomy
//! - Historical parameter estimation
//! - Closed-form position valuation and impermanent loss
//! - Fee, farming and gas accrual math

/// Enumerations shared across crates.
pub mod enums;
/// Error taxonomy.
pub mod error;
/// Lognormal parameter estimation from price history.
pub mod estimation;
/// Liquidity and probability math.
pub mod math;
/// Valuation, impermanent loss and yield metrics.
pub mod metrics;
/// Immutable value objects.
pub mod value_objects;

pub use error::{RiskError, RiskResult};
