//! Market-data collaborators for the yield/risk core.
//!
//! The core never performs I/O. Callers fetch price histories and pool
//! snapshots through a [`MarketDataProvider`] and pass the values in.

/// Serialized market-data and portfolio documents.
pub mod documents;
/// Provider implementations.
pub mod providers;

pub use documents::{MarketDataDocument, PortfolioDocument, PortfolioEntry};
pub use providers::{InMemoryMarketData, JsonMarketData};

use anyhow::Result;
use async_trait::async_trait;
use lp_risk_domain::value_objects::pool_snapshot::PoolSnapshot;
use lp_risk_domain::value_objects::price_series::PriceSeries;

/// Source of historical prices and live pool data.
///
/// `Ok(None)` signals that the source has no data for the request; errors are
/// reserved for failures of the source itself.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily price-ratio history of `pair`, at most `days + 1` most recent points.
    async fn price_history(&self, pair: &str, days: usize) -> Result<Option<PriceSeries>>;

    /// Current snapshot of `pool`.
    async fn pool_snapshot(&self, pool: &str) -> Result<Option<PoolSnapshot>>;

    /// Daily log returns of `asset` over at most `days` most recent days.
    async fn asset_returns(&self, asset: &str, days: usize) -> Result<Option<Vec<f64>>> {
        Ok(self
            .price_history(asset, days)
            .await?
            .map(|series| series.log_returns()))
    }
}
