//! Relay CLI - call contracts bound at runtime from JSON ABIs.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_call, run_estimate, run_functions, run_send, run_tokens};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Functions(args) => run_functions(&args, cli.format)?,
        Commands::Call(args) => run_call(&args, cli.format).await?,
        Commands::Estimate(args) => run_estimate(&args, cli.format).await?,
        Commands::Send(args) => run_send(&args, cli.format).await?,
        Commands::Tokens(args) => run_tokens(&args, cli.format).await?,
    }

    Ok(())
}
