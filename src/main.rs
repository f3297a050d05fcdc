mod models;
mod request;
mod client;
mod cost;
mod pipeline;
mod presenter;
mod logger;
mod config;
mod error;

use std::io::{self, Write};
use std::process::ExitCode;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use client::CompletionClient;
use config::{Cli, Config};
use error::CompletionError;
use models::CompletionRequest;
use pipeline::Outcome;
use request::GenerationDefaults;

fn main() -> ExitCode {

    // .env has to be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout is reserved for the answer
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run_until_cancelled(&cli));

    // a stdin read still pending on the blocking pool must not hold up exit
    runtime.shutdown_background();
    code

}

async fn run_until_cancelled(cli: &Cli) -> ExitCode {

    tokio::select! {
        result = run(cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let _ = presenter::render_error(&e, &mut io::stderr());
                ExitCode::from(e.exit_code())
            }
        },
        _ = tokio::signal::ctrl_c() => {
            // dropping the in-flight request releases the connection
            warn!("cancelled before the endpoint answered");
            ExitCode::from(130)
        }
    }

}

async fn run(cli: &Cli) -> Result<(), CompletionError> {

    let config = Config::from_cli(cli)?;
    let client = CompletionClient::new(&config.endpoint, &config.api_key, config.timeout)?;

    let prompt = if cli.prompt.is_empty() {
        print!("Enter your prompt: ");
        io::stdout().flush()?;
        // async so the ctrl_c branch can still fire while waiting for input
        read_prompt(BufReader::new(tokio::io::stdin())).await?
    } else {
        cli.prompt.join(" ")
    };

    let request = prepare_request(config.system.as_deref(), &prompt, &config.defaults)?;
    debug!(endpoint = %client.endpoint(), model = %request.model, "prepared request");

    let outcome = pipeline::run(&client, &request, &config.rates).await?;

    if let (Outcome::Completed(report), Some(log_path)) = (&outcome, &config.log_path) {
        logger::log_usage(log_path, report);
    }

    let mut stdout = io::stdout().lock();
    presenter::render(&outcome, &mut stdout)?;

    Ok(())

}

fn prepare_request(
    system: Option<&str>,
    prompt: &str,
    defaults: &GenerationDefaults
) -> Result<CompletionRequest, CompletionError> {

    match system {
        Some(system) => request::build_with_system(Some(system), prompt, defaults),
        None => request::build(prompt, defaults)
    }

}

/// Reads one line of input. Trimming and blank checks happen in the request builder.
async fn read_prompt<R: AsyncBufRead + Unpin>(mut input: R) -> io::Result<String> {

    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line)

}
