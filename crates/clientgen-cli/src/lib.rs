//! clientgen CLI library.
//!
//! Everything the `clientgen` binary does lives here so it can be tested:
//! argument definitions, configuration loading, the generation
//! orchestrator, command implementations, and report formatters.
//!
//! # Examples
//!
//! ```
//! use clientgen_cli::orchestrator::Orchestrator;
//! use clientgen_core::ResolvedConfig;
//! use clientgen_introspector::{StaticSchema, fallback_schema};
//! # use tempfile::TempDir;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! # let temp = TempDir::new().unwrap();
//! let config = ResolvedConfig {
//!     api_key: Some("sk-test".to_string()),
//!     output_dir: temp.path().join("api-client"),
//!     ..ResolvedConfig::default()
//! };
//!
//! let orchestrator = Orchestrator::new(Box::new(StaticSchema::new(fallback_schema()))).unwrap();
//! let report = orchestrator.run(&config).await.unwrap();
//! assert!(report.files.iter().any(|f| f == "api/users.ts"));
//! # }
//! ```

#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod config_loader;
pub mod formatters;
pub mod orchestrator;
pub mod runner;

pub use cli::{Cli, Commands, SourceArgs};
pub use orchestrator::{Orchestrator, RunReport};
