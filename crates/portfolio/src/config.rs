use lp_risk_domain::math::normal::{Z_95, Z_99};
use serde::{Deserialize, Serialize};

/// Settings for [`crate::PortfolioAggregator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Symbols excluded from the correlation matrix (case-insensitive).
    pub stablecoins: Vec<String>,
    /// Correlation assumed for an asset pair without usable history.
    /// An approximation, not an estimate.
    pub fallback_correlation: f64,
    /// One-sided 95% z-score.
    pub z_95: f64,
    /// One-sided 99% z-score.
    pub z_99: f64,
    /// Tail mass beyond `z_95`, the CVaR denominator.
    pub tail_probability: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            stablecoins: ["USDC", "USDT", "DAI", "BUSD", "FDUSD", "TUSD", "USD1"]
                .into_iter()
                .map(String::from)
                .collect(),
            fallback_correlation: 0.5,
            z_95: Z_95,
            z_99: Z_99,
            tail_probability: 0.05,
        }
    }
}

impl PortfolioConfig {
    #[must_use]
    pub fn is_stablecoin(&self, symbol: &str) -> bool {
        self.stablecoins
            .iter()
            .any(|s| s.eq_ignore_ascii_case(symbol))
    }

    /// Non-stablecoin assets of `assets`, upper-cased and deduplicated.
    #[must_use]
    pub fn volatile_assets(&self, assets: &[String]) -> Vec<String> {
        let mut out: Vec<String> = assets
            .iter()
            .filter(|a| !self.is_stablecoin(a))
            .map(|a| a.to_ascii_uppercase())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stablecoin_filter() {
        let config = PortfolioConfig::default();
        let assets = vec!["usdc".to_string(), "eth".to_string(), "ETH".to_string()];
        assert!(config.is_stablecoin("usdt"));
        assert_eq!(config.volatile_assets(&assets), vec!["ETH".to_string()]);
    }
}
