/// One-sided 95% standard-normal quantile.
pub const Z_95: f64 = 1.645;
/// One-sided 99% standard-normal quantile.
pub const Z_99: f64 = 2.326;

/// Standard normal CDF, `Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))`.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal density.
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Probability that a lognormal terminal price stays within `[lower, upper]`.
///
/// `log_mean` and `log_std` are the moments of `ln(P_T / P_0)`; with
/// `log_std == 0` the outcome is deterministic.
pub fn lognormal_in_range_probability(
    entry_price: f64,
    lower: f64,
    upper: f64,
    log_mean: f64,
    log_std: f64,
) -> f64 {
    let lo = (lower / entry_price).ln();
    let hi = (upper / entry_price).ln();
    if log_std <= 0.0 {
        return if log_mean >= lo && log_mean <= hi { 1.0 } else { 0.0 };
    }
    let p = normal_cdf((hi - log_mean) / log_std) - normal_cdf((lo - log_mean) / log_std);
    p.clamp(0.0, 1.0)
}
