//! Matjip CLI
//!
//! Command-line client for the Matjip restaurant API

use clap::Parser;
use matjip::cli::{describe_error, Cli, Runner};
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        debug!("Command failed: {e:?}");
        eprintln!("Error: {}", describe_error(&e));
        std::process::exit(1);
    }
}
