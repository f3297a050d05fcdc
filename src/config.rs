use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use crate::client::DEFAULT_TIMEOUT;
use crate::cost::{PricingRates, COST_PER_MILLION_OUTPUT_TOKENS, COST_PER_MILLION_TOKENS};
use crate::error::CompletionError;
use crate::request::{GenerationDefaults, DEFAULT_MODEL};

#[derive(Debug, Parser)]
#[command(name = "llm_oneshot", version, about = "Send one prompt to a chat-completion endpoint and report the cost")]
pub struct Cli {
    /// Prompt to send; read from stdin when omitted
    pub prompt: Vec<String>,

    /// Optional system message sent before the prompt
    #[arg(long)]
    pub system: Option<String>,

    /// API key for the endpoint
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completion endpoint URL
    #[arg(long, env = "AZURE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Model identifier
    #[arg(long, env = "LLM_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Request timeout in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// USD per million total tokens
    #[arg(long, env = "COST_PER_MILLION_TOKENS", default_value_t = COST_PER_MILLION_TOKENS)]
    pub cost_per_million_tokens: f64,

    /// USD per million output tokens
    #[arg(long, env = "COST_PER_MILLION_OUTPUT_TOKENS", default_value_t = COST_PER_MILLION_OUTPUT_TOKENS)]
    pub cost_per_million_output_tokens: f64,

    /// Append a usage line per completed call to this file
    #[arg(long, env = "LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub defaults: GenerationDefaults,
    pub rates: PricingRates,
    pub system: Option<String>,
    pub log_path: Option<PathBuf>
}

// keeps the key out of debug output
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("defaults", &self.defaults)
            .field("rates", &self.rates)
            .field("system", &self.system)
            .field("log_path", &self.log_path)
            .finish()
    }
}

impl Config {

    pub fn from_cli(cli: &Cli) -> Result<Self, CompletionError> {

        let api_key = required(cli.api_key.as_deref(), "API_KEY")?;
        let endpoint = required(cli.endpoint.as_deref(), "AZURE_ENDPOINT")?;

        if cli.timeout_secs == 0 {
            return Err(CompletionError::Config("LLM_TIMEOUT_SECS must be greater than zero".to_string()));
        }

        let model = cli.model.trim();
        if model.is_empty() {
            return Err(CompletionError::Config("LLM_MODEL must not be empty".to_string()));
        }

        let rates = PricingRates::new(cli.cost_per_million_tokens, cli.cost_per_million_output_tokens);
        if !valid_rate(rates.cost_per_million_total_tokens) || !valid_rate(rates.cost_per_million_output_tokens) {
            return Err(CompletionError::Config("token costs must be finite and non-negative".to_string()));
        }

        Ok(Config {
            api_key,
            endpoint,
            timeout: Duration::from_secs(cli.timeout_secs),
            defaults: GenerationDefaults { model: model.to_string(), ..Default::default() },
            rates,
            system: cli.system.clone(),
            log_path: cli.log_path.clone()
        })

    }

}

fn required(value: Option<&str>, name: &str) -> Result<String, CompletionError> {

    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CompletionError::Config(format!("{} must be set", name)))
    }

}

fn valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate >= 0.0
}
