//! Faultline CLI binary.

use anyhow::Result;
use faultline::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the faultline CLI.
fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=faultline=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faultline=info")),
        )
        .with_target(false)
        .init();

    tracing::debug!("Starting faultline CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Faultline CLI completed successfully");
    Ok(())
}
