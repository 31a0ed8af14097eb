// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contract-deployer")]
#[command(about = "Deploy smart-contract bundles through make/forge over HTTP")]
#[command(version)]
pub struct Cli {
    /// Path to the config file (default: discover deployer.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the deployed address
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a deployer.yml template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Listen address (overrides config)
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },

    /// Run a single deployment from the terminal
    Deploy {
        /// Bundle to deploy: iao, staking, token or payment
        kind: String,

        /// Env-file parameter as KEY=VALUE (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}
