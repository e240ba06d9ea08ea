//! Common utilities shared across CLI commands.
//!
//! Builds the resolved configuration and the schema source from CLI
//! arguments, and maps errors to remediation hints.

use crate::cli::SourceArgs;
use crate::config_loader;
use clientgen_core::config::DEFAULT_CONFIG_FILE;
use clientgen_core::traits::SchemaSource;
use clientgen_core::workspace::Workspace;
use clientgen_core::{Error, ResolvedConfig, Result, resolve};
use clientgen_introspector::{SchemaFetcher, StaticSchema};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command-line switches that override the resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Output directory, relative paths resolve against the workspace root
    pub output: Option<PathBuf>,
    /// Force `generation.overwrite`
    pub overwrite: bool,
    /// Force `generation.dryRun`
    pub dry_run: bool,
}

impl RunOverrides {
    /// Applies the switches. Flags only ever turn toggles on.
    pub fn apply(&self, config: &mut ResolvedConfig, root: &Path) {
        if let Some(output) = &self.output {
            config.output_dir = if output.is_absolute() {
                output.clone()
            } else {
                root.join(output)
            };
        }
        config.generation.overwrite |= self.overwrite;
        config.generation.dry_run |= self.dry_run;
    }
}

/// Loads and resolves the configuration selected by `source`.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the configuration file is missing or
/// malformed.
///
/// # Examples
///
/// ```
/// use clientgen_cli::cli::SourceArgs;
/// use clientgen_cli::commands::common::resolve_config;
/// use clientgen_core::workspace::MemoryWorkspace;
///
/// let workspace = MemoryWorkspace::new("/app")
///     .with_file("clientgen.config.json", r#"{ "apiKey": "k", "outputDir": "gen" }"#);
/// let source = SourceArgs { env: "dev".to_string(), ..SourceArgs::default() };
///
/// let config = resolve_config(&source, &workspace).unwrap();
/// assert_eq!(config.environment, "dev");
/// assert_eq!(config.output_dir, std::path::Path::new("/app/gen"));
/// ```
pub fn resolve_config(source: &SourceArgs, workspace: &dyn Workspace) -> Result<ResolvedConfig> {
    let loaded = config_loader::load(source.config.as_deref(), workspace)?;
    info!(
        origin = ?loaded.origin,
        path = %loaded.path.as_deref().map_or_else(|| "-".to_string(), |p| p.display().to_string()),
        "Configuration loaded"
    );
    Ok(resolve(&loaded.config, &source.environment(), workspace))
}

/// Picks the schema source: a local file when `--schema` is given,
/// otherwise the HTTP fetcher.
///
/// # Errors
///
/// Returns [`Error::SchemaUnavailable`] if the schema file cannot be read.
pub async fn schema_source(source: &SourceArgs) -> Result<Box<dyn SchemaSource>> {
    if let Some(path) = &source.schema {
        debug!(path = %path.display(), "Using local schema file");
        return Ok(Box::new(StaticSchema::from_file(path).await?));
    }
    let fetcher = SchemaFetcher::new().with_fallback(!source.no_fallback);
    Ok(Box::new(fetcher))
}

/// One or two commands or edits that fix `error`.
///
/// # Examples
///
/// ```
/// use clientgen_cli::commands::common::remediation;
/// use clientgen_core::Error;
///
/// let hints = remediation(&Error::OutputNotEmpty { path: "src/api".into() });
/// assert!(hints.iter().any(|h| h.contains("--overwrite")));
/// ```
#[must_use]
pub fn remediation(error: &Error) -> Vec<String> {
    match error {
        Error::ConfigError { field, .. } if field == "apiKey" => vec![
            format!("Set apiKey in {DEFAULT_CONFIG_FILE}, or export the variable its ${{...}} placeholder names"),
            "clientgen init-config  # writes a starter configuration".to_string(),
        ],
        Error::ConfigError { field, .. } => vec![
            format!("Fix '{field}' in {DEFAULT_CONFIG_FILE}"),
            "clientgen validate --verbose".to_string(),
        ],
        Error::SchemaUnavailable { .. } => vec![
            "Check baseUrl, apiVersion and network access".to_string(),
            "clientgen generate --schema <schema.json>  # generate from a local schema".to_string(),
        ],
        Error::SchemaValidation { .. } => vec![
            "Fix the listed schema violations".to_string(),
            "clientgen validate  # re-check without writing files".to_string(),
        ],
        Error::OutputNotEmpty { .. } => vec![
            "clientgen generate --overwrite".to_string(),
            "clientgen generate --output <empty-directory>".to_string(),
        ],
        Error::OutputUnwritable { path, .. } => vec![
            format!("Check permissions on {}", path.display()),
            "clientgen generate --output <writable-directory>".to_string(),
        ],
        _ => vec!["clientgen generate --verbose".to_string()],
    }
}
