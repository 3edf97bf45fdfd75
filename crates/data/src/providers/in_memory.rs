use crate::MarketDataProvider;
use crate::documents::MarketDataDocument;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lp_risk_domain::value_objects::pool_snapshot::PoolSnapshot;
use lp_risk_domain::value_objects::price_series::PriceSeries;

/// Provider serving a fixed [`MarketDataDocument`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    document: MarketDataDocument,
}

impl InMemoryMarketData {
    #[must_use]
    pub fn new(document: MarketDataDocument) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn with_price_history(mut self, key: impl Into<String>, prices: Vec<f64>) -> Self {
        self.document.price_history.insert(key.into(), prices);
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: impl Into<String>, snapshot: PoolSnapshot) -> Self {
        self.document.pools.insert(pool.into(), snapshot);
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketData {
    async fn price_history(&self, pair: &str, days: usize) -> Result<Option<PriceSeries>> {
        let Some(prices) = self.document.price_history.get(pair) else {
            return Ok(None);
        };
        if prices.is_empty() {
            return Ok(None);
        }
        let start = prices.len().saturating_sub(days.saturating_add(1));
        let series = PriceSeries::new(prices[start..].to_vec())
            .with_context(|| format!("invalid price history for {pair}"))?;
        Ok(Some(series))
    }

    async fn pool_snapshot(&self, pool: &str) -> Result<Option<PoolSnapshot>> {
        Ok(self.document.pools.get(pool).cloned())
    }
}
