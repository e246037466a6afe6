use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use nodespec::cli::{run_compile, run_validate, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let result = match &cli.command {
        Commands::Compile(args) => run_compile(args),
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(e) = result {
        error!("{e:#}");
        process::exit(1);
    }
}
