use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

use commands::Outcome;
use idea_store::Repository;

/// Exit code when the requested idea does not exist.
const EXIT_NOT_FOUND: i32 = 2;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(Outcome::Done) => {}
        Ok(Outcome::NotFound) => std::process::exit(EXIT_NOT_FOUND),
        Err(error) => {
            eprintln!("ideas error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<Outcome> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;

    let repo = Repository::open(&config)
        .await
        .context("failed to open idea repository")?;

    commands::dispatch::dispatch(cli.command, &repo, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("IDEAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
