use lp_risk_portfolio::prelude::*;
use std::collections::HashMap;

fn position(name: &str, allocation: f64, vol: f64, assets: &[&str]) -> PortfolioPosition {
    PortfolioPosition::new(
        name,
        allocation,
        0.03,
        vol,
        assets.iter().map(|s| s.to_string()).collect(),
    )
}

#[test]
fn test_same_asset_positions_do_not_diversify() {
    let sigma = 0.12;
    let risk = PortfolioAggregator::default()
        .aggregate(
            vec![
                position("BNB/USDT v2", 100.0, sigma, &["BNB", "USDT"]),
                position("BNB/USDT v3", 100.0, sigma, &["BNB", "USDT"]),
            ],
            &HashMap::new(),
        )
        .unwrap();

    assert!((risk.volatility - sigma).abs() < 1e-12);
    assert!(risk.diversification_benefit.abs() < 1e-9);
    assert_eq!(risk.total_investment, 200.0);
}

#[test]
fn test_perfectly_correlated_history_matches_same_asset() {
    let series = vec![0.01, -0.02, 0.015, 0.005, -0.01, 0.02];
    let mut returns = HashMap::new();
    returns.insert("bnb".to_string(), series.clone());
    returns.insert("ETH".to_string(), series);

    let risk = PortfolioAggregator::default()
        .aggregate(
            vec![
                position("bnb pool", 100.0, 0.2, &["bnb", "usdc"]),
                position("eth pool", 100.0, 0.2, &["ETH", "USDC"]),
            ],
            &returns,
        )
        .unwrap();

    assert!((risk.correlation.get("BNB", "ETH").unwrap() - 1.0).abs() < 1e-12);
    assert!((risk.volatility - 0.2).abs() < 1e-9);
    assert!(risk.diversification_benefit.abs() < 1e-9);
}

#[test]
fn test_missing_history_uses_fallback_correlation() {
    let risk = PortfolioAggregator::default()
        .aggregate(
            vec![
                position("a", 300.0, 0.1, &["CAKE"]),
                position("b", 100.0, 0.3, &["XVS"]),
            ],
            &HashMap::new(),
        )
        .unwrap();

    assert_eq!(risk.correlation.get("CAKE", "XVS"), Some(0.5));
    let (w1, w2): (f64, f64) = (0.75, 0.25);
    let expected = (w1 * w1 * 0.01 + w2 * w2 * 0.09 + 2.0 * w1 * w2 * 0.1 * 0.3 * 0.5).sqrt();
    assert!((risk.volatility - expected).abs() < 1e-12);

    let weights: f64 = risk.positions.iter().map(|p| p.weight).sum();
    assert!((weights - 1.0).abs() < 1e-12);
    assert!((risk.expected_return - 0.03).abs() < 1e-12);

    let json = serde_json::to_string(&risk).unwrap();
    assert!(json.contains("diversification_benefit"));
}

#[test]
fn test_correlation_matrix_is_symmetric() {
    let mut returns = HashMap::new();
    returns.insert("A".to_string(), vec![0.01, 0.03, -0.02, 0.0]);
    returns.insert("B".to_string(), vec![0.02, -0.01, 0.01, 0.01, 0.0]);
    returns.insert("C".to_string(), vec![0.0, 0.0, 0.0]);

    let aggregator = PortfolioAggregator::default();
    let positions = vec![
        position("x", 1.0, 0.1, &["A", "B"]),
        position("y", 1.0, 0.1, &["C", "D"]),
    ];
    let matrix = aggregator.correlation_matrix(&positions, &returns);

    assert_eq!(matrix.len(), 4);
    for (i, row) in matrix.values().iter().enumerate() {
        assert_eq!(row[i], 1.0);
        for (j, rho) in row.iter().enumerate() {
            assert_eq!(*rho, matrix.values()[j][i]);
        }
    }
    // Flat series correlates at zero; absent series falls back.
    assert_eq!(matrix.get("A", "C"), Some(0.0));
    assert_eq!(matrix.get("A", "D"), Some(0.5));
}

#[test]
fn test_identical_multi_asset_positions_do_not_diversify() {
    let sigma = 0.12;
    let risk = PortfolioAggregator::default()
        .aggregate(
            vec![
                position("BNB/CAKE v2", 100.0, sigma, &["BNB", "CAKE"]),
                position("CAKE/BNB v3", 100.0, sigma, &["CAKE", "BNB"]),
            ],
            &HashMap::new(),
        )
        .unwrap();

    assert_eq!(risk.correlation.get("BNB", "CAKE"), Some(0.5));
    assert!((risk.volatility - sigma).abs() < 1e-9);
    assert!(risk.diversification_benefit.abs() < 1e-9);

    let single = PortfolioAggregator::default()
        .aggregate(
            vec![position("BNB/CAKE", 200.0, sigma, &["BNB", "CAKE"])],
            &HashMap::new(),
        )
        .unwrap();
    assert!((risk.var_95 - single.var_95).abs() < 1e-9);
    assert!((risk.cvar_95 - single.cvar_95).abs() < 1e-9);
}
