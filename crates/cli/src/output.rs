//! Table and JSON rendering of command results.

use anyhow::Result;
use lp_risk_analyzer::{RankedOpportunity, ReallocationCheck, YieldReport};
use lp_risk_domain::value_objects::percentage::Percentage;
use lp_risk_optimization::OptimizedRange;
use lp_risk_portfolio::PortfolioRisk;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::json;

fn usd(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

fn pct(fraction: f64) -> String {
    format!("{}%", Percentage::from_fraction(fraction).as_percent(2))
}

fn ratio(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(4)
}

fn optional(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn print_report(label: &str, report: &YieldReport, as_json: bool) -> Result<()> {
    let summary = report.summary();
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "summary": summary, "report": report }))?
        );
        return Ok(());
    }

    println!("\n{label}: {:?}, {} days", report.kind, report.days);
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Initial value (USD)", summary.initial_value]);
    table.add_row(row!["Expected value (USD)", summary.expected_value]);
    table.add_row(row!["Expected return (USD)", summary.expected_return]);
    table.add_row(row!["Expected return", format!("{}%", summary.expected_return_pct)]);
    table.add_row(row!["Annualized APY", format!("{}%", summary.annualized_apy_pct)]);
    table.add_row(row!["Fee APY", format!("{}%", summary.fee_apy_pct)]);
    table.add_row(row!["Farming APY", format!("{}%", summary.farming_apy_pct)]);
    table.add_row(row!["Impermanent loss", format!("{}%", summary.impermanent_loss_pct)]);
    table.add_row(row!["Gas cost (USD)", summary.gas_cost]);
    table.add_row(row!["Time in range", format!("{}%", summary.in_range_pct)]);
    table.add_row(row![
        "P5 / P25 (USD)",
        format!("{} / {}", summary.percentile_5, summary.percentile_25)
    ]);
    table.add_row(row!["Median (USD)", summary.median]);
    table.add_row(row![
        "P75 / P95 (USD)",
        format!("{} / {}", summary.percentile_75, summary.percentile_95)
    ]);
    table.add_row(row!["Probability of loss", format!("{}%", summary.probability_of_loss_pct)]);
    table.add_row(row!["VaR 5% (USD)", summary.value_at_risk_5]);
    table.add_row(row!["Harvest every (days)", summary.harvest_days]);
    table.add_row(row![
        "Range",
        format!(
            "{} - {}",
            optional(summary.lower_price),
            optional(summary.upper_price)
        )
    ]);
    table.add_row(row!["Capital efficiency", optional(summary.capital_efficiency)]);
    table.printstd();
    Ok(())
}

pub fn print_candidates(optimized: &OptimizedRange, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(optimized)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_titles(row![
        "Width",
        "Lower",
        "Upper",
        "Harvest",
        "E[return] (USD)",
        "P(in range)",
        "Cap. eff.",
        "Score"
    ]);
    for c in &optimized.candidates {
        let marker = if c == &optimized.best { "*" } else { "" };
        table.add_row(row![
            format!("{}{}", pct(c.width), marker),
            ratio(c.range.lower_price),
            ratio(c.range.upper_price),
            c.harvest_days,
            usd(c.expected_return),
            pct(c.in_range_probability),
            ratio(c.capital_efficiency),
            usd(c.score)
        ]);
    }
    table.printstd();
    Ok(())
}

pub fn print_ranking(
    ranking: &[RankedOpportunity],
    reallocation: Option<&ReallocationCheck>,
    as_json: bool,
) -> Result<()> {
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "ranking": ranking,
                "reallocation": reallocation,
            }))?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_titles(row!["Rank", "Position", "Return / risk", "E[return]", "APY", "P(loss)"]);
    for r in ranking {
        table.add_row(row![
            r.rank,
            r.name,
            r.risk_adjusted_return
                .map_or_else(|| "riskless".to_string(), |v| ratio(v).to_string()),
            pct(r.expected_return_fraction),
            pct(r.annualized_apy),
            pct(r.probability_of_loss)
        ]);
    }
    table.printstd();

    if let Some(check) = reallocation {
        println!(
            "Reallocation {}: benefit ${} vs required ${} (switching cost ${})",
            if check.is_profitable { "profitable" } else { "not profitable" },
            usd(check.expected_benefit),
            usd(check.min_required_benefit),
            usd(check.switching_cost)
        );
    }
    Ok(())
}

pub fn print_portfolio(risk: &PortfolioRisk, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(risk)?);
        return Ok(());
    }

    let mut positions = Table::new();
    positions.set_titles(row![
        "Position",
        "Allocation (USD)",
        "Weight",
        "E[return]",
        "Volatility",
        "Sharpe"
    ]);
    for p in &risk.positions {
        positions.add_row(row![
            p.name,
            usd(p.allocation),
            pct(p.weight),
            pct(p.expected_return),
            pct(p.volatility),
            ratio(p.sharpe_ratio)
        ]);
    }
    positions.printstd();

    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Total investment (USD)", usd(risk.total_investment)]);
    table.add_row(row!["Expected return", pct(risk.expected_return)]);
    table.add_row(row!["Volatility", pct(risk.volatility)]);
    table.add_row(row!["VaR 95% (USD)", usd(risk.var_95)]);
    table.add_row(row!["VaR 99% (USD)", usd(risk.var_99)]);
    table.add_row(row!["CVaR 95% (USD)", usd(risk.cvar_95)]);
    table.add_row(row!["Sharpe ratio", ratio(risk.sharpe_ratio)]);
    table.add_row(row!["Sortino ratio", ratio(risk.sortino_ratio)]);
    table.add_row(row!["Diversification benefit", pct(risk.diversification_benefit)]);
    table.printstd();
    Ok(())
}
