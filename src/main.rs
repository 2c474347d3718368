use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobbot::collectors::linkedin::LinkedInClient;
use jobbot::collectors::runner::{self, RunOptions};
use jobbot::config::{AppConfig, Cli, Command, RunArgs};
use jobbot::error::AppError;
use jobbot::output::{self, OutputTarget};

/// Exit status for a run rejected before any request was sent.
const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobbot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.resolved_command() {
        Command::Run(args) => run(args).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app) if app.is_config() => {
                tracing::error!("{app}");
                Ok(ExitCode::from(EXIT_CONFIG))
            }
            _ => Err(e),
        },
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    // Config errors abort here, before any request is sent.
    let config = AppConfig::load(&args.config)?;
    let client = LinkedInClient::new(&config.http)?;

    tracing::info!(
        "Searching '{}' in '{}' for up to {} jobs",
        config.linkedin.keywords,
        config.linkedin.location,
        config.linkedin.results_wanted
    );

    let options = RunOptions {
        verbose: args.print_urls,
    };
    let outcome = runner::scrape(&client, &config.linkedin, options).await?;

    tracing::info!(
        "Run completed: {} jobs, {} pages, stopped on {}; next offset {}",
        outcome.jobs.len(),
        outcome.pages_fetched,
        outcome.stop_reason,
        outcome.next_offset
    );

    output::write_jobs(&outcome.jobs, &OutputTarget::parse(&args.out))?;
    Ok(())
}
