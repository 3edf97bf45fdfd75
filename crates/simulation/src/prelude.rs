//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_risk_simulation::prelude::*;
//! ```

// Configuration
pub use crate::config::SimulationConfig;

// Monte Carlo
pub use crate::monte_carlo::{DrawOutcome, MonteCarloRunner, SimulationRun};

// Price sampling
pub use crate::price_path::{TerminalPriceModel, box_muller, standard_normal};

// Statistics
pub use crate::statistics::{SimulationStatistics, nearest_rank};
