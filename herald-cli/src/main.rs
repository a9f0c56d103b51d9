//! Herald CLI
//!
//! Command-line interface for submitting builds to the Herald webhook service.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Herald build trigger CLI", long_about = None)]
struct Cli {
    /// Herald service URL
    #[arg(long, env = "HERALD_URL", default_value = "http://localhost:8080")]
    herald_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        herald_url: cli.herald_url,
    };

    handle_command(cli.command, &config).await
}
