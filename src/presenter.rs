use std::io::{self, Write};
use crate::error::CompletionError;
use crate::pipeline::Outcome;

pub fn render(outcome: &Outcome, out: &mut impl Write) -> io::Result<()> {

    match outcome {
        Outcome::Completed(report) => {
            writeln!(out, "LLM Response:")?;
            writeln!(out, "{}", report.text)?;
            writeln!(out, "Total Tokens: {}", report.usage.total_tokens)?;
            writeln!(out, "Estimated costs: ${:.6}", report.cost.estimated_total_cost)?;
            writeln!(out, "Output Cost: ${:.6}", report.cost.estimated_output_cost)?;
        }
        Outcome::NoChoices { .. } => {
            writeln!(out, "No choices found in response")?;
        }
    }

    Ok(())

}

/// Writes a failure, followed by the provider's raw body when there is one.
pub fn render_error(err: &CompletionError, out: &mut impl Write) -> io::Result<()> {

    writeln!(out, "Error: {}", err)?;
    if let Some(body) = err.raw_body() {
        writeln!(out, "{}", body)?;
    }

    Ok(())

}
