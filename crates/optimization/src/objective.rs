use std::cmp::Ordering;

/// What the optimizer knows about one candidate before scoring it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateMetrics {
    pub initial_value: f64,
    /// Mean simulated profit, USD.
    pub expected_return: f64,
    /// Probability the terminal price stays inside the range.
    pub in_range_probability: f64,
    pub capital_efficiency: f64,
}

pub trait ObjectiveFunction {
    fn evaluate(&self, metrics: &CandidateMetrics) -> f64;
    fn compare(&self, a: &CandidateMetrics, b: &CandidateMetrics) -> Ordering {
        self.evaluate(a)
            .partial_cmp(&self.evaluate(b))
            .unwrap_or(Ordering::Equal)
    }
}

/// `E * p_in * ln(ce) - (1 - p_in) * V * penalty`
///
/// Rewards concentration only in proportion to the chance of staying in
/// range, and charges a flat share of capital for the chance of leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAdjustedReturn {
    pub out_of_range_penalty: f64,
}

impl Default for RiskAdjustedReturn {
    fn default() -> Self {
        Self {
            out_of_range_penalty: 0.1,
        }
    }
}

impl ObjectiveFunction for RiskAdjustedReturn {
    fn evaluate(&self, m: &CandidateMetrics) -> f64 {
        m.expected_return * m.in_range_probability * m.capital_efficiency.ln()
            - (1.0 - m.in_range_probability) * m.initial_value * self.out_of_range_penalty
    }
}

/// Ignores range risk and ranks by mean profit alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaximizeExpectedReturn;
impl ObjectiveFunction for MaximizeExpectedReturn {
    fn evaluate(&self, m: &CandidateMetrics) -> f64 {
        m.expected_return
    }
}
