//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `SourceArgs` - Configuration and schema selection shared by commands

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use clientgen_core::EnvironmentName;
use clientgen_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

/// clientgen - typed TypeScript API clients from an API schema.
///
/// Fetches the schema of an API, validates it, and writes types, request
/// functions, an HTTP client, and optional state stores.
#[derive(Parser, Debug)]
#[command(name = "clientgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the API client.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Use ./clientgen.config.json and the prod environment
    /// clientgen generate
    ///
    /// # Preview a dev build from a local schema
    /// clientgen generate --env dev --schema schema.json --dry-run
    /// ```
    Generate {
        /// Configuration and schema selection
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory, overrides `outputDir`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace files in a non-empty output directory
        #[arg(long)]
        overwrite: bool,

        /// Run every step except writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch and validate the schema without generating anything.
    Validate {
        /// Configuration and schema selection
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write a starter configuration file.
    InitConfig {
        /// File to create
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the configuration and the schema come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Configuration file (default: ./clientgen.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Runtime environment selecting an `environments` block
    #[arg(short, long, env = "CLIENTGEN_ENV", default_value = EnvironmentName::DEFAULT)]
    pub env: String,

    /// Read the schema from a local JSON file instead of the API
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Fail instead of using the built-in fallback schema
    #[arg(long, conflicts_with = "schema")]
    pub no_fallback: bool,
}

impl SourceArgs {
    /// Selected environment.
    #[must_use]
    pub fn environment(&self) -> EnvironmentName {
        EnvironmentName::new(self.env.as_str())
    }
}
