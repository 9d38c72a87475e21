mod cli;
mod client;
mod commands;
mod config;
mod error;
mod filter;
mod output;
mod responses;
#[cfg(test)]
mod testing;
mod types;

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use client::DidClient;
use config::Config;
use error::{DidError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_logging(verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, verbose),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "did=debug" } else { "did=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

/// The one place that decides the exit status.
fn report(e: &DidError, verbose: bool) -> ExitCode {
    if e.is_benign() {
        output::print_warning(&e.to_string());
        return ExitCode::SUCCESS;
    }

    eprintln!("{}", output::error_text(&format!("Error: {e}")));

    if verbose {
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("Caused by: {cause}");
            source = cause.source();
        }
    }

    ExitCode::FAILURE
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require a token
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "did", &mut io::stdout());
        }
        Commands::Config(args) => {
            let mut config = Config::load()?;
            commands::config::run(&mut config, cli.api_token.as_deref(), args)?;
        }
        // Commands that talk to the API
        command => {
            let config = Config::load()?;
            let credentials = config.credentials(cli.api_token.as_deref())?;
            let client = DidClient::new(credentials)?;

            match command {
                Commands::Teams => {
                    commands::teams::list(&client).await?;
                }
                Commands::Do(args) => {
                    commands::dones::run_do(&client, args, cli.goal, cli.interactive).await?;
                }
                Commands::Open { team } => {
                    commands::open::run(&client, &config, team).await?;
                }
                Commands::Dones(args) => {
                    commands::dones::list(&client, &config, args).await?;
                }
                Commands::Completions { .. } | Commands::Config(_) => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
