//! Init-config command implementation.
//!
//! Writes a starter `clientgen.config.json`. The credential is written as
//! a `${CLIENTGEN_API_KEY}` placeholder so the file can be committed.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use clientgen_core::config::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, EnvironmentOverride, ProjectType,
};
use clientgen_core::cli::{ExitCode, OutputFormat};
use clientgen_core::{EnvironmentName, Error, UserConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable the starter configuration reads the key from.
pub const API_KEY_VARIABLE: &str = "CLIENTGEN_API_KEY";

/// Result of writing a starter configuration.
#[derive(Debug, Serialize)]
struct InitResult {
    /// File written
    path: PathBuf,
    /// An existing file was replaced
    replaced: bool,
    /// Next command to run
    next: String,
}

/// Starter configuration: defaults spelled out plus a `dev` environment.
#[must_use]
pub fn starter_config() -> UserConfig {
    let mut config = UserConfig {
        api_key: Some(format!("${{{API_KEY_VARIABLE}}}")),
        base_url: Some(DEFAULT_BASE_URL.to_string()),
        api_version: Some(DEFAULT_API_VERSION.to_string()),
        output_dir: Some(PathBuf::from(DEFAULT_OUTPUT_DIR)),
        project_type: Some(ProjectType::Auto),
        ..UserConfig::default()
    };
    config.environments.insert(
        "dev".to_string(),
        EnvironmentOverride {
            base_url: Some("http://localhost:3000".to_string()),
            ..EnvironmentOverride::default()
        },
    );
    config
}

/// Writes the starter configuration to `path`.
///
/// Returns `true` if an existing file was replaced.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the file exists and `force` is off,
/// or an I/O error if it cannot be written.
pub fn write_starter(path: &Path, force: bool) -> Result<bool> {
    let exists = path.exists();
    if exists && !force {
        return Err(Error::ConfigError {
            field: "config".to_string(),
            message: format!("{} already exists (pass --force to replace it)", path.display()),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut text = serde_json::to_string_pretty(&starter_config())?;
    text.push('\n');
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), replaced = exists, "Wrote starter configuration");
    Ok(exists)
}

/// Runs the init-config command.
///
/// # Errors
///
/// Returns an error if the file exists without `--force` or cannot be
/// written.
pub async fn run(path: PathBuf, force: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let replaced = write_starter(&path, force)?;

    let result = InitResult {
        next: format!(
            "export {API_KEY_VARIABLE}=<key> && clientgen generate --env {}",
            EnvironmentName::DEFAULT
        ),
        path,
        replaced,
    };
    println!("{}", format_output(&result, output_format)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::{parse, placeholder_name};
    use tempfile::TempDir;

    #[test]
    fn test_starter_round_trips_through_loader() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clientgen.config.json");
        assert!(!write_starter(&path, false).unwrap());

        let text = std::fs::read_to_string(&path).unwrap();
        let config = parse(&text, "starter").unwrap();
        assert_eq!(config, starter_config());
        assert_eq!(
            placeholder_name(config.api_key.as_deref().unwrap()),
            Some(API_KEY_VARIABLE)
        );
        assert!(text.contains("\"apiKey\""));
        assert!(text.contains("\"dev\""));
    }

    #[test]
    fn test_refuses_to_replace_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clientgen.config.json");
        std::fs::write(&path, "{}").unwrap();

        let err = write_starter(&path, false).unwrap_err();
        assert!(err.downcast_ref::<Error>().unwrap().is_config_error());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        assert!(write_starter(&path, true).unwrap());
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config/clientgen.config.json");
        write_starter(&path, false).unwrap();
        assert!(path.is_file());
    }
}
