use tracing::info;
use crate::client::CompletionClient;
use crate::cost::{self, CostEstimate, PricingRates};
use crate::error::CompletionError;
use crate::models::{CompletionRequest, CompletionResponse, Usage};

/// What a finished call produced, kept as separate values for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub text: String,
    pub model: String,
    pub usage: Usage,
    pub cost: CostEstimate
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed(CompletionReport),
    /// The call succeeded but the provider returned no choices.
    NoChoices { usage: Usage }
}

/// One attempt: send the request, take the first choice, price it.
pub async fn run(
    client: &CompletionClient,
    request: &CompletionRequest,
    rates: &PricingRates
) -> Result<Outcome, CompletionError> {

    let response = client.complete(request).await?;
    Ok(assemble(&request.model, response, rates))

}

pub fn assemble(model: &str, response: CompletionResponse, rates: &PricingRates) -> Outcome {

    let usage = response.usage;

    match response.first_text() {
        Some(text) => {
            let cost = cost::estimate(&usage, rates);
            info!(
                model,
                total_tokens = usage.total_tokens,
                completion_tokens = usage.completion_tokens,
                estimated_cost = cost.estimated_total_cost,
                "completion received"
            );
            Outcome::Completed(CompletionReport {
                text: text.to_string(),
                model: model.to_string(),
                usage,
                cost
            })
        }
        None => {
            info!(model, total_tokens = usage.total_tokens, "completion returned no choices");
            Outcome::NoChoices { usage }
        }
    }

}
