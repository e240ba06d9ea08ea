//! Command execution and runtime logic.
//!
//! Contains command dispatch, logging initialization, and the error report
//! printed when a command fails.

use anyhow::Result;
use clientgen_core::cli::{ExitCode, OutputFormat};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Commands;
use crate::commands;

/// Initializes logging infrastructure.
///
/// Logs go to stderr so the run report on stdout stays machine-readable.
/// `--verbose` forces the debug level, otherwise `RUST_LOG` applies with
/// `info` as the fallback.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub async fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            source,
            output,
            overwrite,
            dry_run,
        } => {
            let overrides = commands::common::RunOverrides {
                output,
                overwrite,
                dry_run,
            };
            commands::generate::run(source, overrides, output_format).await
        }
        Commands::Validate { source } => commands::validate::run(source, output_format).await,
        Commands::InitConfig { path, force } => {
            commands::init_config::run(path, force, output_format).await
        }
        Commands::Completions { shell } => {
            use crate::cli::Cli;
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}

/// Prints a failed command's error and remediation hints to stderr, and
/// returns the exit code for it.
#[must_use]
pub fn report_error(error: &anyhow::Error) -> ExitCode {
    eprintln!("{} {error:#}", "error:".red().bold());

    let Some(core) = error.downcast_ref::<clientgen_core::Error>() else {
        return ExitCode::ERROR;
    };
    for hint in commands::common::remediation(core) {
        eprintln!("  {} {hint}", "hint:".cyan().bold());
    }
    ExitCode::for_error(core)
}
