use lp_risk_domain::enums::NormalSampler;
use lp_risk_domain::value_objects::distribution::DistributionParameters;
use rand::Rng;
use rand::distr::{Distribution, Open01};
use rand_distr::StandardNormal;

/// Standard-normal shock from two independent uniforms on `(0, 1)`.
///
/// `z = sqrt(-2 ln u1) * cos(2 pi u2)`
pub fn box_muller<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = Open01.sample(rng);
    let u2: f64 = Open01.sample(rng);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Draws a standard-normal shock with the chosen algorithm.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R, sampler: NormalSampler) -> f64 {
    match sampler {
        NormalSampler::BoxMuller => box_muller(rng),
        NormalSampler::Ziggurat => StandardNormal.sample(rng),
    }
}

/// Lognormal model of the price ratio at the end of the holding period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalPriceModel {
    pub entry_price: f64,
    /// `days * mu`.
    pub log_mean: f64,
    /// `sqrt(days) * sigma`.
    pub log_std: f64,
    pub sampler: NormalSampler,
}

impl TerminalPriceModel {
    #[must_use]
    pub fn new(
        entry_price: f64,
        parameters: &DistributionParameters,
        days: u32,
        sampler: NormalSampler,
    ) -> Self {
        let (log_mean, log_std) = parameters.horizon_moments(f64::from(days));
        Self {
            entry_price,
            log_mean,
            log_std,
            sampler,
        }
    }

    /// Terminal price for a given standard-normal shock.
    #[must_use]
    pub fn price_for_shock(&self, z: f64) -> f64 {
        self.entry_price * (self.log_mean + self.log_std * z).exp()
    }

    /// Draws one terminal price.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.price_for_shock(standard_normal(rng, self.sampler))
    }
}
