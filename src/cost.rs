use crate::models::Usage;

// published price for the default model (likely to change)
pub const COST_PER_MILLION_TOKENS: f64 = 0.15;
pub const COST_PER_MILLION_OUTPUT_TOKENS: f64 = 0.6;

/// USD price assumption for one model, per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRates {
    pub cost_per_million_total_tokens: f64,
    pub cost_per_million_output_tokens: f64
}

impl PricingRates {

    pub fn new(cost_per_million_total_tokens: f64, cost_per_million_output_tokens: f64) -> Self {
        Self { cost_per_million_total_tokens, cost_per_million_output_tokens }
    }

}

impl Default for PricingRates {
    fn default() -> Self {
        Self::new(COST_PER_MILLION_TOKENS, COST_PER_MILLION_OUTPUT_TOKENS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub estimated_total_cost: f64,
    pub estimated_output_cost: f64
}

/// Estimates what a call cost from its reported usage.
///
/// The counters are used as reported; `total_tokens` is not re-derived from
/// prompt and completion counts.
pub fn estimate(usage: &Usage, rates: &PricingRates) -> CostEstimate {

    let cost_per_token = rates.cost_per_million_total_tokens / 1_000_000.0;
    let cost_per_output_token = rates.cost_per_million_output_tokens / 1_000_000.0;

    CostEstimate {
        estimated_total_cost: usage.total_tokens as f64 * cost_per_token,
        estimated_output_cost: usage.completion_tokens as f64 * cost_per_output_token
    }

}
