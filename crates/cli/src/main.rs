//! Command line interface for liquidity-position yield and risk analysis.
mod output;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use lp_risk_analyzer::prelude::*;
use lp_risk_data::{JsonMarketData, MarketDataProvider, PortfolioEntry, providers::load_portfolio};
use lp_risk_domain::enums::{NormalSampler, PartialPeriodPolicy};
use lp_risk_domain::estimation::estimate_parameters;
use lp_risk_domain::value_objects::pool_snapshot::PoolSnapshot;
use lp_risk_domain::value_objects::position_config::PositionConfig;
use lp_risk_domain::value_objects::price_series::PriceSeries;
use lp_risk_optimization::{OptimizerConfig, RangeOptimizer};
use lp_risk_portfolio::prelude::*;
use lp_risk_simulation::config::SimulationConfig;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lp-risk")]
#[command(about = "Monte Carlo yield and risk analysis for liquidity positions", long_about = None)]
struct Cli {
    /// Market data JSON file (defaults to MARKET_DATA_PATH)
    #[arg(long, global = true)]
    market_data: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Monte Carlo draws per analysis
    #[arg(long, global = true, default_value_t = 1000)]
    draws: usize,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Standard-normal sampler for price shocks
    #[arg(long, global = true, value_enum, default_value_t = SamplerArg::BoxMuller)]
    sampler: SamplerArg,

    /// Compound a trailing partial harvest period instead of dropping it
    #[arg(long, global = true)]
    prorate: bool,

    /// Gas units per deposit or harvest transaction
    #[arg(long, global = true, default_value_t = 200_000)]
    gas_units: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SamplerArg {
    BoxMuller,
    Ziggurat,
}

impl From<SamplerArg> for NormalSampler {
    fn from(arg: SamplerArg) -> Self {
        match arg {
            SamplerArg::BoxMuller => NormalSampler::BoxMuller,
            SamplerArg::Ziggurat => NormalSampler::Ziggurat,
        }
    }
}

#[derive(Args)]
struct MarketArgs {
    /// Price history key, e.g. BNB/USDT
    #[arg(short, long)]
    pair: String,

    /// Pool key in the market data file
    #[arg(long)]
    pool: String,

    /// Capital in USD
    #[arg(short, long, default_value_t = 10_000.0)]
    capital: f64,

    /// Holding period in days
    #[arg(short, long, default_value_t = 30)]
    days: u32,

    /// Entry price (defaults to the last observed price)
    #[arg(long)]
    entry_price: Option<f64>,

    /// Fee tier as a fraction
    #[arg(long, default_value_t = 0.0025)]
    fee_tier: f64,

    /// Days of price history to fit
    #[arg(long, default_value_t = 90)]
    history_days: usize,
}

#[derive(Args)]
struct PositionArgs {
    #[command(flatten)]
    market: MarketArgs,

    /// Provide full-range liquidity
    #[arg(long, conflicts_with_all = ["lower", "upper", "optimize"])]
    full_range: bool,

    /// Lower price bound
    #[arg(long, requires = "upper")]
    lower: Option<f64>,

    /// Upper price bound
    #[arg(long, requires = "lower")]
    upper: Option<f64>,

    /// Let the optimizer choose bounds and harvest period
    #[arg(long)]
    optimize: bool,

    /// Harvest period in days
    #[arg(long)]
    harvest_days: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one position
    Analyze(PositionArgs),
    /// Show the range optimizer grid for a concentrated position
    Optimize(MarketArgs),
    /// Rank the positions of a portfolio file and check a reallocation
    Compare {
        /// Portfolio JSON file
        #[arg(long)]
        portfolio: PathBuf,

        /// Name of the position currently held
        #[arg(long)]
        current: Option<String>,

        /// Cost of switching positions, USD
        #[arg(long, default_value_t = 0.0)]
        switching_cost: f64,
    },
    /// Aggregate the risk of a portfolio file
    Portfolio {
        /// Portfolio JSON file
        #[arg(long)]
        portfolio: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let provider = load_market_data(cli.market_data.clone()).await?;

    let simulation = simulation_config(&cli);
    let mut rng = simulation.rng();
    let analyzer = PositionAnalyzer::new(simulation.clone(), OptimizerConfig::default());

    match &cli.command {
        Commands::Analyze(args) => {
            let market = &args.market;
            let (history, snapshot) =
                fetch_inputs(&provider, &market.pair, &market.pool, market.history_days).await?;
            let position = position_config(args, &history)?;
            let report = analyzer.analyze(&position, &history, &snapshot, &mut rng)?;
            output::print_report(&market.pair, &report, cli.json)?;
        }
        Commands::Optimize(args) => {
            let (history, snapshot) =
                fetch_inputs(&provider, &args.pair, &args.pool, args.history_days).await?;
            let entry_price = entry_price(args.entry_price, &history)?;
            let position =
                PositionConfig::concentrated(args.capital, args.days, entry_price, args.fee_tier)
                    .with_range_optimization();
            let parameters = estimate_parameters(&history)?;
            let optimized = RangeOptimizer::new(OptimizerConfig::default()).optimize(
                &position,
                &parameters,
                snapshot.metrics()?,
                &simulation,
                &mut rng,
            )?;
            output::print_candidates(&optimized, cli.json)?;
        }
        Commands::Compare {
            portfolio,
            current,
            switching_cost,
        } => {
            let document = load_portfolio(portfolio).await?;
            let mut reports = Vec::with_capacity(document.positions.len());
            for entry in &document.positions {
                let report =
                    analyze_entry(&analyzer, &provider, entry, document.history_days, &mut rng)
                        .await?;
                reports.push((entry.name.clone(), report));
            }

            let ranking = rank_opportunities(reports.iter().map(|(n, r)| (n.as_str(), r)));
            let reallocation = match (current, ranking.first()) {
                (Some(current), Some(best)) => {
                    let held = find_report(&reports, current)?;
                    let candidate = find_report(&reports, &best.name)?;
                    Some(check_reallocation(
                        held,
                        candidate,
                        *switching_cost,
                        &ReallocationConfig::default(),
                    )?)
                }
                _ => None,
            };
            output::print_ranking(&ranking, reallocation.as_ref(), cli.json)?;
        }
        Commands::Portfolio { portfolio } => {
            let document = load_portfolio(portfolio).await?;
            let aggregator = PortfolioAggregator::default();

            let mut positions = Vec::with_capacity(document.positions.len());
            for entry in &document.positions {
                let report =
                    analyze_entry(&analyzer, &provider, entry, document.history_days, &mut rng)
                        .await?;
                positions.push(PortfolioPosition::from_report(
                    &entry.name,
                    &report,
                    entry.assets.clone(),
                ));
            }

            let mut asset_returns = HashMap::new();
            for position in &positions {
                for asset in aggregator.config.volatile_assets(&position.assets) {
                    if asset_returns.contains_key(&asset) {
                        continue;
                    }
                    match provider.asset_returns(&asset, document.history_days).await? {
                        Some(returns) => {
                            asset_returns.insert(asset, returns);
                        }
                        None => warn!(asset = %asset, "No price history for asset"),
                    }
                }
            }

            let risk = aggregator.aggregate(positions, &asset_returns)?;
            output::print_portfolio(&risk, cli.json)?;
        }
    }

    Ok(())
}

fn simulation_config(cli: &Cli) -> SimulationConfig {
    let mut simulation = SimulationConfig::default()
        .with_draws(cli.draws)
        .with_gas_units(cli.gas_units)
        .with_normal_sampler(cli.sampler.into());
    if cli.prorate {
        simulation = simulation.with_partial_period(PartialPeriodPolicy::Prorate);
    }
    if let Some(seed) = cli.seed {
        simulation = simulation.with_seed(seed);
    }
    simulation
}

async fn load_market_data(path: Option<PathBuf>) -> Result<JsonMarketData> {
    let path = match path {
        Some(path) => path,
        None => env::var("MARKET_DATA_PATH")
            .map(PathBuf::from)
            .context("pass --market-data or set MARKET_DATA_PATH")?,
    };
    info!(path = %path.display(), "Loading market data");
    JsonMarketData::load(path).await
}

async fn fetch_inputs(
    provider: &impl MarketDataProvider,
    pair: &str,
    pool: &str,
    history_days: usize,
) -> Result<(PriceSeries, PoolSnapshot)> {
    let history = provider
        .price_history(pair, history_days)
        .await?
        .ok_or_else(|| anyhow!("no price history for {pair}"))?;
    let snapshot = provider
        .pool_snapshot(pool)
        .await?
        .ok_or_else(|| anyhow!("no snapshot for pool {pool}"))?;
    Ok((history, snapshot))
}

fn entry_price(explicit: Option<f64>, history: &PriceSeries) -> Result<f64> {
    explicit
        .or_else(|| history.prices().last().copied())
        .ok_or_else(|| anyhow!("no entry price given and the price history is empty"))
}

fn position_config(args: &PositionArgs, history: &PriceSeries) -> Result<PositionConfig> {
    let market = &args.market;
    let entry_price = entry_price(market.entry_price, history)?;
    if args.full_range {
        return Ok(PositionConfig::full_range(
            market.capital,
            market.days,
            entry_price,
            market.fee_tier,
            args.harvest_days.unwrap_or(7),
        ));
    }

    let mut position =
        PositionConfig::concentrated(market.capital, market.days, entry_price, market.fee_tier);
    if let (Some(lower), Some(upper)) = (args.lower, args.upper) {
        position = position.with_range(lower, upper);
    }
    if let Some(harvest_days) = args.harvest_days {
        position = position.with_harvest_days(harvest_days);
    }
    if args.optimize {
        position = position.with_range_optimization();
    }
    Ok(position)
}

async fn analyze_entry(
    analyzer: &PositionAnalyzer,
    provider: &impl MarketDataProvider,
    entry: &PortfolioEntry,
    history_days: usize,
    rng: &mut StdRng,
) -> Result<YieldReport> {
    let (history, snapshot) = fetch_inputs(provider, &entry.pair, &entry.pool, history_days).await?;
    analyzer
        .analyze(&entry.position, &history, &snapshot, rng)
        .with_context(|| format!("analysis of {} failed", entry.name))
}

fn find_report<'a>(reports: &'a [(String, YieldReport)], name: &str) -> Result<&'a YieldReport> {
    reports
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, r)| r)
        .ok_or_else(|| anyhow!("no position named {name} in the portfolio"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_flags() {
        let cli = Cli::try_parse_from([
            "lp-risk", "--prorate", "--sampler", "ziggurat", "--gas-units", "150000", "--seed",
            "7", "portfolio", "--portfolio", "p.json",
        ])
        .unwrap();
        let config = simulation_config(&cli);
        assert_eq!(config.partial_period, PartialPeriodPolicy::Prorate);
        assert_eq!(config.normal_sampler, NormalSampler::Ziggurat);
        assert_eq!(config.gas_units_per_tx, 150_000);
        assert_eq!(config.seed, Some(7));

        let cli = Cli::try_parse_from(["lp-risk", "portfolio", "--portfolio", "p.json"]).unwrap();
        assert_eq!(simulation_config(&cli), SimulationConfig::default().with_draws(1000));
    }

    #[test]
    fn test_optimize_rejects_range_flags() {
        let base = ["lp-risk", "optimize", "--pair", "BNB/USDT", "--pool", "bnb-usdt"];
        assert!(Cli::try_parse_from(base).is_ok());
        for extra in [
            &["--harvest-days", "7"][..],
            &["--lower", "500", "--upper", "700"][..],
            &["--full-range"][..],
        ] {
            let args: Vec<&str> = base.iter().chain(extra).copied().collect();
            assert!(Cli::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn test_analyze_accepts_range_flags() {
        let cli = Cli::try_parse_from([
            "lp-risk", "analyze", "--pair", "BNB/USDT", "--pool", "bnb-usdt", "--lower", "500",
            "--upper", "700", "--harvest-days", "7",
        ])
        .unwrap();
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let history = PriceSeries::new(vec![600.0, 620.0]).unwrap();
        let position = position_config(&args, &history).unwrap();
        assert_eq!(position.entry_price, 620.0);
        assert_eq!(position.harvest_days, Some(7));
    }
}
