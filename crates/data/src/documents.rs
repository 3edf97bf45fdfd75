use lp_risk_domain::value_objects::pool_snapshot::PoolSnapshot;
use lp_risk_domain::value_objects::position_config::PositionConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Market data as stored on disk.
///
/// ```json
/// {
///   "price_history": { "BNB/USDT": [600.0, 612.5, 605.1] },
///   "pools": { "pancake-bnb-usdt": { "volume_24h": 2500000.0, "tvl": 30000000.0 } }
/// }
/// ```
///
/// Asset histories (`"BNB"`) and pair histories (`"BNB/USDT"`) share the
/// `price_history` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataDocument {
    /// Chronological daily prices keyed by pair or asset symbol.
    pub price_history: HashMap<String, Vec<f64>>,
    /// Pool snapshots keyed by pool identifier.
    pub pools: HashMap<String, PoolSnapshot>,
}

/// One position of a portfolio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub name: String,
    /// Key into `price_history` for the position's price ratio.
    pub pair: String,
    /// Key into `pools`.
    pub pool: String,
    /// Asset symbols the position is exposed to.
    pub assets: Vec<String>,
    pub position: PositionConfig,
}

/// A portfolio file: the positions to analyze and aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioDocument {
    pub positions: Vec<PortfolioEntry>,
    /// History window in days.
    #[serde(default = "default_history_days")]
    pub history_days: usize,
}

fn default_history_days() -> usize {
    90
}
