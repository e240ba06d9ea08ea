//! clientgen command-line entry point.
//!
//! # Examples
//!
//! ```bash
//! # Write a starter configuration
//! clientgen init-config
//!
//! # Generate into the configured output directory
//! CLIENTGEN_API_KEY=sk-live clientgen generate
//!
//! # Check the schema of the dev environment only
//! clientgen validate --env dev --format json
//! ```

use anyhow::Result;
use clap::Parser;
use clientgen_cli::Cli;
use clientgen_cli::runner::{execute_command, init_logging, report_error};
use clientgen_core::cli::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = match execute_command(cli.command, output_format).await {
        Ok(code) => code,
        Err(error) => report_error(&error),
    };

    std::process::exit(exit_code.as_i32());
}
