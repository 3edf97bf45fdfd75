use crate::report::YieldReport;
use lp_risk_domain::error::RiskResult;
use lp_risk_domain::estimation::estimate_parameters;
use lp_risk_domain::metrics::{ConcentratedValuation, FullRangeValuation, PositionValuation};
use lp_risk_domain::value_objects::distribution::DistributionParameters;
use lp_risk_domain::value_objects::pool_snapshot::PoolSnapshot;
use lp_risk_domain::value_objects::position_config::{PositionConfig, RangePlan};
use lp_risk_domain::value_objects::price_series::PriceSeries;
use lp_risk_optimization::{OptimizerConfig, RangeOptimizer};
use lp_risk_simulation::config::SimulationConfig;
use lp_risk_simulation::monte_carlo::MonteCarloRunner;
use lp_risk_simulation::statistics::SimulationStatistics;
use rand::Rng;
use tracing::{debug, info};

/// Runs the full analysis pipeline for one position at a time.
///
/// Holds no state between calls; the random generator is supplied per call.
#[derive(Debug, Clone, Default)]
pub struct PositionAnalyzer {
    pub simulation: SimulationConfig,
    pub optimizer: RangeOptimizer,
}

impl PositionAnalyzer {
    #[must_use]
    pub fn new(simulation: SimulationConfig, optimizer: OptimizerConfig) -> Self {
        Self {
            simulation,
            optimizer: RangeOptimizer::new(optimizer),
        }
    }

    /// Fits the price model to `history` and analyzes the position.
    ///
    /// # Errors
    /// - [`lp_risk_domain::RiskError::InvalidRangeConfiguration`] for an unusable range plan
    /// - [`lp_risk_domain::RiskError::InsufficientData`] for fewer than two prices
    /// - [`lp_risk_domain::RiskError::MissingSnapshotField`] for an incomplete snapshot
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        position: &PositionConfig,
        history: &PriceSeries,
        snapshot: &PoolSnapshot,
        rng: &mut R,
    ) -> RiskResult<YieldReport> {
        position.plan()?;
        let parameters = estimate_parameters(history)?;
        self.analyze_with_parameters(position, &parameters, snapshot, rng)
    }

    /// Analyzes the position under already-fitted parameters.
    pub fn analyze_with_parameters<R: Rng + ?Sized>(
        &self,
        position: &PositionConfig,
        parameters: &DistributionParameters,
        snapshot: &PoolSnapshot,
        rng: &mut R,
    ) -> RiskResult<YieldReport> {
        let plan = position.plan()?;
        let pool = snapshot.metrics()?;

        let (valuation, harvest_days, optimal_range) = match plan {
            RangePlan::FullRange { harvest_days } => (
                PositionValuation::FullRange(FullRangeValuation::new(
                    position.initial_value,
                    position.entry_price,
                )),
                harvest_days,
                None,
            ),
            RangePlan::Fixed {
                range,
                harvest_days,
            } => (
                PositionValuation::Concentrated(ConcentratedValuation::new(
                    position.initial_value,
                    position.entry_price,
                    range,
                )?),
                harvest_days,
                None,
            ),
            RangePlan::Optimize => {
                let optimized =
                    self.optimizer
                        .optimize(position, parameters, pool, &self.simulation, rng)?;
                let best = optimized.best;
                (
                    PositionValuation::Concentrated(ConcentratedValuation::new(
                        position.initial_value,
                        position.entry_price,
                        best.range,
                    )?),
                    best.harvest_days,
                    Some(best),
                )
            }
        };

        debug!(
            kind = ?position.kind,
            harvest_days,
            mu = parameters.mu,
            sigma = parameters.sigma,
            "Simulating position"
        );

        let range = valuation.range();
        let runner = MonteCarloRunner::new(
            position,
            valuation,
            harvest_days,
            parameters,
            pool,
            self.simulation.clone(),
        )?;
        let run = runner.run(rng);
        let statistics =
            SimulationStatistics::from_values(&run.final_values, position.initial_value)?;

        info!(
            draws = statistics.draws,
            expected_value = statistics.mean,
            probability_of_loss = statistics.probability_of_loss,
            "Position analysis complete"
        );

        Ok(YieldReport::from_run(
            position.kind,
            position.days,
            harvest_days,
            *parameters,
            run,
            statistics,
            range,
            optimal_range,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_risk_domain::RiskError;
    use lp_risk_domain::enums::PositionKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snapshot() -> PoolSnapshot {
        PoolSnapshot::new(3_000_000.0, 40_000_000.0)
            .with_farming(14_400.0, 0.03, 2.4, 8_000_000.0)
            .with_gas(3.0, 620.0)
    }

    fn analyzer() -> PositionAnalyzer {
        PositionAnalyzer::new(
            SimulationConfig::default().with_draws(400),
            OptimizerConfig::default(),
        )
    }

    #[test]
    fn test_full_range_report() {
        let position = PositionConfig::full_range(5_000.0, 30, 1.0, 0.0025, 7);
        let params = DistributionParameters::new(0.0, 0.02, 60);
        let report = analyzer()
            .analyze_with_parameters(&position, &params, &snapshot(), &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(report.kind, PositionKind::FullRange);
        assert_eq!(report.final_values.len(), 400);
        assert!(report.range.is_none());
        assert!(report.capital_efficiency.is_none());
        assert_eq!(report.in_range_fraction, 1.0);
        assert!(report.mean_impermanent_loss <= 0.0);
    }

    #[test]
    fn test_optimize_sets_optimal_range() {
        let position =
            PositionConfig::concentrated(10_000.0, 30, 650.0, 0.0025).with_range_optimization();
        let params = DistributionParameters::new(0.0, 0.03, 60);
        let report = analyzer()
            .analyze_with_parameters(&position, &params, &snapshot(), &mut StdRng::seed_from_u64(2))
            .unwrap();
        let best = report.optimal_range.unwrap();
        assert_eq!(report.range, Some(best.range));
        assert_eq!(report.harvest_days, best.harvest_days);
        assert_eq!(report.capital_efficiency, Some(best.range.capital_efficiency()));
    }

    #[test]
    fn test_range_plan_checked_before_history() {
        let position = PositionConfig::concentrated(10_000.0, 30, 650.0, 0.0025);
        let short = PriceSeries::new(vec![650.0]).unwrap();
        let err = analyzer()
            .analyze(&position, &short, &snapshot(), &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidRangeConfiguration(_)));
    }

    #[test]
    fn test_missing_snapshot_field() {
        let position = PositionConfig::full_range(5_000.0, 30, 1.0, 0.0025, 7);
        let snapshot = PoolSnapshot::new(3_000_000.0, 40_000_000.0).with_gas(3.0, 620.0);
        let err = analyzer()
            .analyze_with_parameters(
                &position,
                &DistributionParameters::new(0.0, 0.0, 10),
                &snapshot,
                &mut StdRng::seed_from_u64(1),
            )
            .unwrap_err();
        assert_eq!(err, RiskError::MissingSnapshotField("reward_emission_per_day"));
    }
}
