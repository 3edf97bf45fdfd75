use super::InMemoryMarketData;
use crate::MarketDataProvider;
use crate::documents::{MarketDataDocument, PortfolioDocument};
use anyhow::{Context, Result};
use async_trait::async_trait;
use lp_risk_domain::value_objects::pool_snapshot::PoolSnapshot;
use lp_risk_domain::value_objects::price_series::PriceSeries;
use std::path::{Path, PathBuf};
use tracing::info;

/// Provider backed by a [`MarketDataDocument`] JSON file, read once on load.
#[derive(Debug, Clone)]
pub struct JsonMarketData {
    path: PathBuf,
    inner: InMemoryMarketData,
}

impl JsonMarketData {
    /// Reads and parses `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid document.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read market data from {}", path.display()))?;
        let document: MarketDataDocument = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse market data in {}", path.display()))?;

        info!(
            path = %path.display(),
            series = document.price_history.len(),
            pools = document.pools.len(),
            "Loaded market data"
        );

        Ok(Self {
            path,
            inner: InMemoryMarketData::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MarketDataProvider for JsonMarketData {
    async fn price_history(&self, pair: &str, days: usize) -> Result<Option<PriceSeries>> {
        self.inner.price_history(pair, days).await
    }

    async fn pool_snapshot(&self, pool: &str) -> Result<Option<PoolSnapshot>> {
        self.inner.pool_snapshot(pool).await
    }
}

/// Reads a [`PortfolioDocument`] JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub async fn load_portfolio(path: impl AsRef<Path>) -> Result<PortfolioDocument> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read portfolio from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse portfolio in {}", path.display()))
}
