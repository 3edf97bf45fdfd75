//! Pearson correlation between assets' historical log returns.
//!
//! Series are aligned on their most recent observations and truncated to the
//! shorter length. A pair with fewer than two overlapping points has no
//! estimate; a pair where either side is flat correlates at zero.

use lp_risk_domain::estimation::population_moments;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Variance below which a series is treated as flat.
const MIN_VARIANCE: f64 = 1e-14;

/// Correlation of two return series over their overlapping tail.
///
/// Returns `None` when fewer than two observations overlap.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }
    let a = &a[a.len() - n..];
    let b = &b[b.len() - n..];

    let (mean_a, var_a) = population_moments(a);
    let (mean_b, var_b) = population_moments(b);
    if var_a < MIN_VARIANCE || var_b < MIN_VARIANCE {
        return Some(0.0);
    }

    let cov = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / n as f64;
    Some((cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0))
}

/// Symmetric correlation matrix with a unit diagonal over a fixed asset list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    assets: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Identity matrix over `assets`.
    #[must_use]
    pub fn identity(assets: Vec<String>) -> Self {
        let n = assets.len();
        let values = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self { assets, values }
    }

    /// Estimates every pair from `returns`, keyed by asset symbol. Pairs
    /// without a usable estimate get `fallback`.
    pub fn from_returns(
        assets: Vec<String>,
        returns: &HashMap<String, Vec<f64>>,
        fallback: f64,
    ) -> Self {
        let mut matrix = Self::identity(assets);
        let n = matrix.assets.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let estimate = match (
                    returns.get(&matrix.assets[i]),
                    returns.get(&matrix.assets[j]),
                ) {
                    (Some(a), Some(b)) => pearson_correlation(a, b),
                    _ => None,
                };
                let rho = estimate.unwrap_or_else(|| {
                    warn!(
                        a = %matrix.assets[i],
                        b = %matrix.assets[j],
                        fallback,
                        "No usable return history for asset pair, using fallback correlation"
                    );
                    fallback
                });
                matrix.values[i][j] = rho;
                matrix.values[j][i] = rho;
            }
        }
        matrix
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Correlation between two assets in the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.assets.iter().position(|x| x == a)?;
        let j = self.assets.iter().position(|x| x == b)?;
        Some(self.values[i][j])
    }

    /// Correlation between two equally weighted asset baskets.
    ///
    /// Normalized by each basket's own cross-correlation so that identical
    /// baskets correlate at exactly one. A position with no assets in the
    /// matrix correlates at zero.
    pub fn position_correlation(&self, a: &[String], b: &[String]) -> f64 {
        let a: Vec<usize> = self.indices(a);
        let b: Vec<usize> = self.indices(b);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let scale = (self.basket_sum(&a, &a) * self.basket_sum(&b, &b)).sqrt();
        if scale <= f64::EPSILON {
            return 0.0;
        }
        (self.basket_sum(&a, &b) / scale).clamp(-1.0, 1.0)
    }

    fn indices(&self, names: &[String]) -> Vec<usize> {
        names
            .iter()
            .filter_map(|name| self.assets.iter().position(|x| x == name))
            .collect()
    }

    fn basket_sum(&self, a: &[usize], b: &[usize]) -> f64 {
        a.iter()
            .flat_map(|&i| b.iter().map(move |&j| self.values[i][j]))
            .sum()
    }

    /// Row-major values.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_perfect_and_inverse_correlation() {
        let a = [0.01, -0.02, 0.03, 0.0];
        let b: Vec<f64> = a.iter().map(|x| 2.0 * x + 0.001).collect();
        let c: Vec<f64> = a.iter().map(|x| -x).collect();
        assert!((pearson_correlation(&a, &b).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&a, &c).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tail_alignment() {
        let long = [5.0, -5.0, 0.01, 0.02, 0.03];
        let short = [0.01, 0.02, 0.03];
        assert!((pearson_correlation(&long, &short).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(pearson_correlation(&[0.01, 0.02], &[0.0]), None);
        let flat = [0.01, 0.01, 0.01];
        assert_eq!(pearson_correlation(&flat, &[0.01, 0.02, 0.03]), Some(0.0));
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let mut returns = HashMap::new();
        returns.insert("BNB".to_string(), vec![0.01, -0.02, 0.015, 0.0, 0.02]);
        returns.insert("ETH".to_string(), vec![0.02, -0.01, 0.01, -0.005, 0.01]);
        returns.insert("CAKE".to_string(), vec![-0.03, 0.01, 0.02, 0.01, -0.02]);
        let matrix =
            CorrelationMatrix::from_returns(assets(&["BNB", "CAKE", "ETH", "XVS"]), &returns, 0.5);

        for a in matrix.assets() {
            assert_eq!(matrix.get(a, a), Some(1.0));
            for b in matrix.assets() {
                let rho = matrix.get(a, b).unwrap();
                assert_eq!(rho, matrix.get(b, a).unwrap());
                assert!((-1.0..=1.0).contains(&rho));
            }
        }
        assert_eq!(matrix.get("BNB", "XVS"), Some(0.5));
    }

    #[test]
    fn test_position_correlation() {
        let mut returns = HashMap::new();
        returns.insert("BNB".to_string(), vec![0.01, -0.02, 0.015]);
        returns.insert("ETH".to_string(), vec![0.01, -0.02, 0.015]);
        let matrix = CorrelationMatrix::from_returns(assets(&["BNB", "ETH"]), &returns, 0.5);

        let rho = matrix.position_correlation(&assets(&["BNB"]), &assets(&["ETH"]));
        assert!((rho - 1.0).abs() < 1e-12);
        assert_eq!(matrix.position_correlation(&assets(&["BNB"]), &assets(&["BNB"])), 1.0);
        assert_eq!(matrix.position_correlation(&[], &assets(&["BNB"])), 0.0);
    }

    #[test]
    fn test_identical_baskets_correlate_fully() {
        let matrix =
            CorrelationMatrix::from_returns(assets(&["BNB", "CAKE", "XVS"]), &HashMap::new(), 0.5);

        let pair = assets(&["BNB", "CAKE"]);
        let swapped = assets(&["CAKE", "BNB"]);
        assert!((matrix.position_correlation(&pair, &pair) - 1.0).abs() < 1e-12);
        assert!((matrix.position_correlation(&pair, &swapped) - 1.0).abs() < 1e-12);

        // Partial overlap sits between the fallback and full correlation.
        let overlap = matrix.position_correlation(&pair, &assets(&["BNB", "XVS"]));
        assert!(overlap > 0.5 && overlap < 1.0);
    }
}
