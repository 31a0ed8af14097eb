// ABOUTME: Entry point for the contract-deployer CLI application.
// ABOUTME: Parses arguments, sets up tracing and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use contract_deployer::config::{self, Config};
use contract_deployer::error::Result;
use contract_deployer::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose selects debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            let path = config::init_config(&cwd, force)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Serve { listen } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(listen) = listen {
                config.listen = listen;
            }
            contract_deployer::api::serve(&config).await
        }
        Commands::Deploy { kind, params } => {
            let config = load_config(cli.config.as_deref())?;
            commands::deploy(&config, &kind, &params, Output::new(mode)).await
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}
